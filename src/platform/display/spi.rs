//! ST7789 panel wired straight to the Raspberry Pi SPI header.

use std::path::Path;

/// BCM pin numbers of the Waveshare 1.69" module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiPins {
    pub reset: u8,
    pub data_command: u8,
    pub backlight: u8,
}

impl Default for SpiPins {
    fn default() -> Self {
        Self {
            reset: 27,
            data_command: 25,
            backlight: 18,
        }
    }
}

/// `(bus, chip select)` of a `/dev/spidevB.C` node.
pub fn parse_spidev(device: &Path) -> Option<(u8, u8)> {
    let name = device.file_name()?.to_str()?;
    let (bus, chip_select) = name.strip_prefix("spidev")?.split_once('.')?;
    Some((bus.parse().ok()?, chip_select.parse().ok()?))
}

#[cfg(target_os = "linux")]
pub use self::rpi::RppalBus;

#[cfg(target_os = "linux")]
mod rpi {
    use std::path::Path;
    use std::time::Duration;

    use rppal::gpio::{Gpio, OutputPin};
    use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

    use super::{parse_spidev, SpiPins};
    use crate::error::{DashError, Result};
    use crate::platform::display::st7789::PanelBus;

    const CLOCK_HZ: u32 = 40_000_000;
    /// spidev's default transfer buffer size
    const CHUNK: usize = 4096;
    const BACKLIGHT_PWM_HZ: f64 = 1000.0;

    fn display_error(context: &str, e: impl std::fmt::Display) -> DashError {
        DashError::display(format!("{}: {}", context, e))
    }

    /// Panel bus over rppal: hardware SPI plus three GPIO outputs.
    pub struct RppalBus {
        spi: Spi,
        data_command: OutputPin,
        reset: OutputPin,
        backlight: OutputPin,
    }

    impl RppalBus {
        pub fn open(device: &Path, pins: SpiPins) -> Result<Self> {
            let (bus, chip_select) = parse_spidev(device).ok_or_else(|| {
                DashError::display(format!("{} is not a spidev node", device.display()))
            })?;
            let bus = match bus {
                0 => Bus::Spi0,
                1 => Bus::Spi1,
                other => return Err(DashError::display(format!("unsupported SPI bus {}", other))),
            };
            let chip_select = match chip_select {
                0 => SlaveSelect::Ss0,
                1 => SlaveSelect::Ss1,
                2 => SlaveSelect::Ss2,
                other => {
                    return Err(DashError::display(format!(
                        "unsupported chip select {}",
                        other
                    )))
                }
            };

            let spi = Spi::new(bus, chip_select, CLOCK_HZ, Mode::Mode0)
                .map_err(|e| display_error("cannot open SPI bus", e))?;
            let gpio = Gpio::new().map_err(|e| display_error("cannot open GPIO", e))?;
            let output = |pin: u8| -> Result<OutputPin> {
                gpio.get(pin)
                    .map(|pin| pin.into_output())
                    .map_err(|e| display_error(&format!("GPIO {} unavailable", pin), e))
            };

            log::info!("SPI panel on {}", device.display());
            Ok(Self {
                spi,
                data_command: output(pins.data_command)?,
                reset: output(pins.reset)?,
                backlight: output(pins.backlight)?,
            })
        }

        fn write(&mut self, bytes: &[u8]) -> Result<()> {
            for chunk in bytes.chunks(CHUNK) {
                self.spi
                    .write(chunk)
                    .map_err(|e| display_error("SPI write failed", e))?;
            }
            Ok(())
        }
    }

    impl PanelBus for RppalBus {
        fn hard_reset(&mut self) -> Result<()> {
            self.reset.set_high();
            std::thread::sleep(Duration::from_millis(10));
            self.reset.set_low();
            std::thread::sleep(Duration::from_millis(10));
            self.reset.set_high();
            std::thread::sleep(Duration::from_millis(120));
            Ok(())
        }

        fn command(&mut self, command: u8) -> Result<()> {
            self.data_command.set_low();
            self.write(&[command])
        }

        fn data(&mut self, bytes: &[u8]) -> Result<()> {
            self.data_command.set_high();
            self.write(bytes)
        }

        fn backlight(&mut self, percent: u8) -> Result<()> {
            self.backlight
                .set_pwm_frequency(BACKLIGHT_PWM_HZ, f64::from(percent) / 100.0)
                .map_err(|e| display_error("backlight PWM failed", e))
        }

        fn delay(&mut self, duration: Duration) {
            std::thread::sleep(duration);
        }
    }
}
