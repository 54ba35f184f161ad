use std::fmt;

/// The six banknotes the model was trained on, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denomination {
    Ten,
    Twenty,
    Fifty,
    Hundred,
    TwoHundred,
    FiveHundred,
}

impl Denomination {
    pub const COUNT: usize = 6;

    pub const ALL: [Denomination; Self::COUNT] = [
        Denomination::Ten,
        Denomination::Twenty,
        Denomination::Fifty,
        Denomination::Hundred,
        Denomination::TwoHundred,
        Denomination::FiveHundred,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[cfg(test)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn rupees(self) -> u32 {
        match self {
            Denomination::Ten => 10,
            Denomination::Twenty => 20,
            Denomination::Fifty => 50,
            Denomination::Hundred => 100,
            Denomination::TwoHundred => 200,
            Denomination::FiveHundred => 500,
        }
    }

    pub fn label(self) -> String {
        format!("{} Rupees", self.rupees())
    }

    /// Name of the bundled clip announcing this note, without extension.
    pub fn audio_asset(self) -> String {
        format!("currency_{}", self.rupees())
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
