use strum::{AsRefStr, EnumCount, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// The twelve independent dimensions of a detailed review.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumIter, EnumCount, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RatingAspect {
    FoodTaste,
    Presentation,
    PortionSize,
    DrinksVariety,
    VeggieOptions,
    GlutenFreeOptions,
    VeganOptions,
    MusicAcoustics,
    Ambiance,
    FurnitureComfort,
    Cleanliness,
    Service,
}

pub type RatingValuePrimitive = i16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Rating value {0} is out of range [1, 10]")]
pub struct InvalidRatingValue(pub RatingValuePrimitive);

/// An integer rating in `[1, 10]`.
///
/// Values can only be obtained through [`RatingValue::try_from`]
/// so every instance is valid by construction.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(10)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<RatingValuePrimitive> for RatingValue {
    type Error = InvalidRatingValue;

    fn try_from(from: RatingValuePrimitive) -> Result<Self, Self::Error> {
        if from < RatingValuePrimitive::from(Self::min().0)
            || from > RatingValuePrimitive::from(Self::max().0)
        {
            return Err(InvalidRatingValue(from));
        }
        Ok(Self(from as u8))
    }
}

impl From<RatingValue> for RatingValuePrimitive {
    fn from(from: RatingValue) -> Self {
        Self::from(from.0)
    }
}

impl From<RatingValue> for f64 {
    fn from(from: RatingValue) -> Self {
        f64::from(from.0)
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatings {
    pub food_taste          : RatingValue,
    pub presentation        : RatingValue,
    pub portion_size        : RatingValue,
    pub drinks_variety      : RatingValue,
    pub veggie_options      : RatingValue,
    pub gluten_free_options : RatingValue,
    pub vegan_options       : RatingValue,
    pub music_acoustics     : RatingValue,
    pub ambiance            : RatingValue,
    pub furniture_comfort   : RatingValue,
    pub cleanliness         : RatingValue,
    pub service             : RatingValue,
}

impl AspectRatings {
    /// Builds the ratings from raw values, rejecting the first one out of range.
    pub fn try_from_fn<F>(mut f: F) -> Result<Self, (RatingAspect, InvalidRatingValue)>
    where
        F: FnMut(RatingAspect) -> RatingValuePrimitive,
    {
        let mut value = |aspect| RatingValue::try_from(f(aspect)).map_err(|err| (aspect, err));
        use RatingAspect::*;
        Ok(Self {
            food_taste: value(FoodTaste)?,
            presentation: value(Presentation)?,
            portion_size: value(PortionSize)?,
            drinks_variety: value(DrinksVariety)?,
            veggie_options: value(VeggieOptions)?,
            gluten_free_options: value(GlutenFreeOptions)?,
            vegan_options: value(VeganOptions)?,
            music_acoustics: value(MusicAcoustics)?,
            ambiance: value(Ambiance)?,
            furniture_comfort: value(FurnitureComfort)?,
            cleanliness: value(Cleanliness)?,
            service: value(Service)?,
        })
    }

    pub fn uniform(value: RatingValue) -> Self {
        Self {
            food_taste: value,
            presentation: value,
            portion_size: value,
            drinks_variety: value,
            veggie_options: value,
            gluten_free_options: value,
            vegan_options: value,
            music_acoustics: value,
            ambiance: value,
            furniture_comfort: value,
            cleanliness: value,
            service: value,
        }
    }

    pub fn get(&self, aspect: RatingAspect) -> RatingValue {
        use RatingAspect::*;
        match aspect {
            FoodTaste => self.food_taste,
            Presentation => self.presentation,
            PortionSize => self.portion_size,
            DrinksVariety => self.drinks_variety,
            VeggieOptions => self.veggie_options,
            GlutenFreeOptions => self.gluten_free_options,
            VeganOptions => self.vegan_options,
            MusicAcoustics => self.music_acoustics,
            Ambiance => self.ambiance,
            FurnitureComfort => self.furniture_comfort,
            Cleanliness => self.cleanliness,
            Service => self.service,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RatingAspect, RatingValue)> + '_ {
        RatingAspect::iter().map(move |aspect| (aspect, self.get(aspect)))
    }

    /// The overall score of a single review, i.e. the mean of all aspects.
    pub fn overall(&self) -> AvgRatingValue {
        let mut builder = AvgRatingValueBuilder::default();
        for (_, value) in self.iter() {
            builder += value;
        }
        builder.build()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct AvgRatingValue(f64);

impl AvgRatingValue {
    pub const fn min() -> Self {
        Self(1.0)
    }

    pub const fn max() -> Self {
        Self(10.0)
    }

    pub fn clamp(self) -> Self {
        Self(self.0.max(Self::min().0).min(Self::max().0))
    }

    /// Rounded to a single decimal place for display.
    pub fn rounded(self) -> Self {
        Self((self.0 * 10.0).round() / 10.0)
    }
}

impl From<f64> for AvgRatingValue {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

impl From<AvgRatingValue> for f64 {
    fn from(from: AvgRatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for AvgRatingValue {
    fn from(from: RatingValue) -> Self {
        f64::from(from).into()
    }
}

/// Accumulates values and yields their arithmetic mean, or zero if empty.
#[derive(Debug, Default, Clone)]
pub struct AvgRatingValueBuilder {
    acc: f64,
    cnt: usize,
}

impl AvgRatingValueBuilder {
    pub fn add(&mut self, val: impl Into<AvgRatingValue>) {
        self.acc += f64::from(val.into());
        self.cnt += 1;
    }

    pub const fn count(&self) -> usize {
        self.cnt
    }

    pub fn build(self) -> AvgRatingValue {
        if self.cnt > 0 {
            AvgRatingValue::from(self.acc / self.cnt as f64).clamp()
        } else {
            Default::default()
        }
    }
}

impl std::ops::AddAssign<RatingValue> for AvgRatingValueBuilder {
    fn add_assign(&mut self, rhs: RatingValue) {
        self.add(rhs);
    }
}

impl std::ops::AddAssign<AvgRatingValue> for AvgRatingValueBuilder {
    fn add_assign(&mut self, rhs: AvgRatingValue) {
        self.add(rhs);
    }
}

/// Per-aspect averages over a set of reviews.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AvgAspectRatings {
    pub aspects: Vec<(RatingAspect, AvgRatingValue)>,
    pub overall: AvgRatingValue,
    pub review_count: usize,
}

impl AvgAspectRatings {
    pub fn get(&self, aspect: RatingAspect) -> AvgRatingValue {
        self.aspects
            .iter()
            .find(|(a, _)| *a == aspect)
            .map(|(_, v)| *v)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct AvgAspectRatingsBuilder {
    aspects: Vec<(RatingAspect, AvgRatingValueBuilder)>,
    overall: AvgRatingValueBuilder,
}

impl Default for AvgAspectRatingsBuilder {
    fn default() -> Self {
        Self {
            aspects: RatingAspect::iter()
                .map(|aspect| (aspect, AvgRatingValueBuilder::default()))
                .collect(),
            overall: Default::default(),
        }
    }
}

impl AvgAspectRatingsBuilder {
    pub fn add(&mut self, ratings: &AspectRatings) {
        for (aspect, builder) in &mut self.aspects {
            *builder += ratings.get(*aspect);
        }
        self.overall += ratings.overall();
    }

    pub fn build(self) -> AvgAspectRatings {
        let review_count = self.overall.count();
        AvgAspectRatings {
            aspects: self
                .aspects
                .into_iter()
                .map(|(aspect, builder)| (aspect, builder.build()))
                .collect(),
            overall: self.overall.build(),
            review_count,
        }
    }
}

impl std::ops::AddAssign<&AspectRatings> for AvgAspectRatingsBuilder {
    fn add_assign(&mut self, rhs: &AspectRatings) {
        self.add(rhs);
    }
}
