use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Number of flashes in an identification blink.
pub const BLINK_COUNT: u8 = 10;

const ON_MS: u32 = 20;
const OFF_MS: u32 = 80;

/// Flash an identification LED: 10 × (20ms on, 80ms off).
///
/// Blocks for about a second. Meant for the host's `BL` handler, not the
/// motion loop.
pub fn blink<LED, DELAY>(led: &mut LED, delay: &mut DELAY) -> Result<(), LED::Error>
where
    LED: OutputPin,
    DELAY: DelayNs,
{
    for _ in 0..BLINK_COUNT {
        led.set_high()?;
        delay.delay_ms(ON_MS);
        led.set_low()?;
        delay.delay_ms(OFF_MS);
    }
    Ok(())
}
