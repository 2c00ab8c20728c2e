use strum::{AsRefStr, EnumIter, EnumString};

/// Price per person in Argentine pesos.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, AsRefStr)]
pub enum PriceRange {
    #[strum(serialize = "under_10000")] Under10000,
    #[strum(serialize = "10000_15000")] From10000To15000,
    #[strum(serialize = "15000_20000")] From15000To20000,
    #[strum(serialize = "20000_30000")] From20000To30000,
    #[strum(serialize = "30000_50000")] From30000To50000,
    #[strum(serialize = "50000_80000")] From50000To80000,
    #[strum(serialize = "over_80000")]  Over80000,
}

impl PriceRange {
    pub const fn label(self) -> &'static str {
        use PriceRange::*;
        match self {
            Under10000 => "Hasta $10.000",
            From10000To15000 => "$10.000 - $15.000",
            From15000To20000 => "$15.000 - $20.000",
            From20000To30000 => "$20.000 - $30.000",
            From30000To50000 => "$30.000 - $50.000",
            From50000To80000 => "$50.000 - $80.000",
            Over80000 => "Más de $80.000",
        }
    }
}
