use crate::command::CommandRunner;
use nerdbar_core::{PanelError, Result, Sensor, VolumeReading};

/// Queries a pamixer-compatible helper for the default sink.
#[derive(Debug)]
pub struct VolumeSensor<R> {
    runner: R,
    mixer: String,
}

impl<R: CommandRunner> VolumeSensor<R> {
    pub fn new(runner: R, mixer: impl Into<String>) -> Self {
        Self {
            runner,
            mixer: mixer.into(),
        }
    }

    fn query(&self, flag: &str) -> Result<String> {
        self.runner.run(&self.mixer, &[flag.to_string()])
    }
}

impl<R: CommandRunner> Sensor for VolumeSensor<R> {
    type Reading = VolumeReading;

    fn sense(&mut self) -> Result<VolumeReading> {
        if self.query("--get-mute")?.contains("true") {
            return Ok(VolumeReading { muted: true, volume: None });
        }

        let raw = self.query("--get-volume")?;
        let volume = raw.trim().parse::<u32>().map_err(|_| PanelError::Parse {
            attribute: "volume",
            value: raw.trim().to_string(),
        })?;

        Ok(VolumeReading { muted: false, volume: Some(volume) })
    }
}
