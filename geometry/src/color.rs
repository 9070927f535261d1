use serde::{Deserialize, Serialize};

/// Linear RGB vertex color.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }
}
