//! Status-line output for the host panel.
//!
//! Output follows the i3bar/swaybar JSON protocol: a header object, the
//! opening `[` of an endless array, then one JSON array of blocks per update.

use nerdbar_config::PanelConfig;
use nerdbar_core::Block;
use serde::Serialize;

/// Which widget kinds appear, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarLayout {
    pub slots: Vec<String>,
}

impl BarLayout {
    /// Build a [`BarLayout`] from the loaded configuration.
    pub fn from_config(config: &PanelConfig) -> Self {
        Self {
            slots: config.global.layout.clone(),
        }
    }
}

#[derive(Serialize)]
struct Header {
    version: u32,
}

/// Latest block per layout slot.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    blocks: Vec<Option<Block>>,
}

impl StatusLine {
    pub fn new(layout: &BarLayout) -> Self {
        Self {
            blocks: vec![None; layout.slots.len()],
        }
    }

    /// Protocol preamble, printed once before the first status line.
    pub fn preamble() -> String {
        let header = serde_json::to_string(&Header { version: 1 })
            .unwrap_or_else(|_| r#"{"version":1}"#.to_string());
        format!("{header}\n[")
    }

    /// Store a block; returns `false` if nothing changed or `slot` is out of range.
    pub fn update(&mut self, slot: usize, block: Block) -> bool {
        match self.blocks.get_mut(slot) {
            Some(current) if current.as_ref() != Some(&block) => {
                *current = Some(block);
                true
            }
            _ => false,
        }
    }

    /// One protocol line: the JSON array of known blocks, followed by `,`.
    /// Slots that have not been polled yet are left out.
    pub fn render(&self) -> serde_json::Result<String> {
        let present: Vec<&Block> = self.blocks.iter().flatten().collect();
        Ok(format!("{},", serde_json::to_string(&present)?))
    }
}
