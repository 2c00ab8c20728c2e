use strum::{AsRefStr, EnumCount, EnumIter, EnumString};

/// Kind of restaurant a place belongs to.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum RestaurantCategory {
    #[strum(serialize = "PARRILLAS")]       Parrillas,
    #[strum(serialize = "CAFE_Y_DELI")]     CafeYDeli,
    #[strum(serialize = "BODEGONES")]       Bodegones,
    #[strum(serialize = "RESTAURANTES")]    Restaurantes,
    #[strum(serialize = "HAMBURGUESERIAS")] Hamburgueserias,
    #[strum(serialize = "PIZZERIAS")]       Pizzerias,
    #[strum(serialize = "PASTAS")]          Pastas,
    #[strum(serialize = "CARRITOS")]        Carritos,
    #[strum(serialize = "BARES")]           Bares,
}

impl RestaurantCategory {
    pub const fn label(self) -> &'static str {
        use RestaurantCategory::*;
        match self {
            Parrillas => "Parrillas",
            CafeYDeli => "Café y Deli",
            Bodegones => "Bodegones",
            Restaurantes => "Restaurantes",
            Hamburgueserias => "Hamburgueserías",
            Pizzerias => "Pizzerías",
            Pastas => "Pastas",
            Carritos => "Carritos",
            Bares => "Bares",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parse_and_print_keys() {
        assert_eq!(Ok(RestaurantCategory::CafeYDeli), "CAFE_Y_DELI".parse());
        assert_eq!(Ok(RestaurantCategory::Bares), "bares".parse());
        assert_eq!("HAMBURGUESERIAS", RestaurantCategory::Hamburgueserias.as_ref());
        assert!("SUSHI".parse::<RestaurantCategory>().is_err());
    }

    #[test]
    fn every_category_has_a_label() {
        assert_eq!(9, RestaurantCategory::iter().count());
        assert!(RestaurantCategory::iter().all(|c| !c.label().is_empty()));
    }
}
