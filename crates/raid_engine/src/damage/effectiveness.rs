//! Type effectiveness lookups.
//!
//! The chart itself is generated from `data/typechart.json`; these helpers
//! combine it for dual types and precompute whole profiles so the
//! enumerator never touches the chart per candidate.

use crate::types::{Type, SUPER_EFFECTIVE, TYPE_CHART};
use std::ops::{Index, IndexMut};

/// Dense map from every type to a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypeMap<T>(pub [T; Type::COUNT]);

impl<T: Copy> TypeMap<T> {
    pub fn filled(value: T) -> Self {
        TypeMap([value; Type::COUNT])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Type, T)> + '_ {
        Type::ALL.into_iter().map(move |t| (t, self.0[t.index()]))
    }
}

impl<T> Index<Type> for TypeMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, t: Type) -> &T {
        &self.0[t.index()]
    }
}

impl<T> IndexMut<Type> for TypeMap<T> {
    #[inline]
    fn index_mut(&mut self, t: Type) -> &mut T {
        &mut self.0[t.index()]
    }
}

/// Multiplier of an attack type against a one- or two-type defender.
///
/// Each defender type compounds multiplicatively in single precision.
#[inline]
pub fn multiplier_against(attack: Type, defender_types: &[Type]) -> f32 {
    defender_types
        .iter()
        .fold(1.0f32, |acc, &def| acc * TYPE_CHART[attack.index()][def.index()])
}

/// Every attack type's multiplier against a fixed defender typing.
pub fn weakness_profile(defender_types: &[Type]) -> TypeMap<f32> {
    let mut map = TypeMap::filled(1.0f32);
    for attack in Type::ALL {
        map[attack] = multiplier_against(attack, defender_types);
    }
    map
}

/// Profile of an unknown opponent: one type super effective, everything else neutral.
pub fn nominal_profile(attack: Type) -> TypeMap<f32> {
    let mut map = TypeMap::filled(1.0f32);
    map[attack] = SUPER_EFFECTIVE;
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_type() {
        assert_eq!(multiplier_against(Type::Fire, &[Type::Grass]), 1.6);
        assert_eq!(multiplier_against(Type::Fire, &[Type::Water]), 0.625);
        assert_eq!(multiplier_against(Type::Electric, &[Type::Ground]), 0.390625);
        assert_eq!(multiplier_against(Type::Normal, &[Type::Fire]), 1.0);
    }

    #[test]
    fn test_dual_type_compounds() {
        // Ice vs Grass/Flying = 1.6 * 1.6 in f32
        assert_eq!(
            multiplier_against(Type::Ice, &[Type::Grass, Type::Flying]),
            1.6f32 * 1.6f32
        );
        // Fire vs Fire/Water = 0.625 * 0.625
        assert_eq!(
            multiplier_against(Type::Fire, &[Type::Fire, Type::Water]),
            0.390625
        );
        // Ground vs Fire/Flying = 1.6 * 0.390625
        assert_eq!(
            multiplier_against(Type::Ground, &[Type::Fire, Type::Flying]),
            1.6f32 * 0.390625f32
        );
    }

    #[test]
    fn test_weakness_profile_matches_lookup() {
        let typing = [Type::Dragon, Type::Flying];
        let profile = weakness_profile(&typing);
        for (attack, mult) in profile.iter() {
            assert_eq!(mult, multiplier_against(attack, &typing));
        }
        assert_eq!(profile[Type::Ice], 1.6f32 * 1.6f32);
    }

    #[test]
    fn test_nominal_profile() {
        let profile = nominal_profile(Type::Fire);
        assert_eq!(profile[Type::Fire], 1.6);
        assert_eq!(profile.iter().filter(|(_, m)| *m != 1.0).count(), 1);
    }
}
