use palette::Srgb;
use serde::{Deserialize, Serialize};

/// An RGB color carried in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub Srgb<u8>);
