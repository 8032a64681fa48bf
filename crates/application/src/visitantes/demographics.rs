//! In-memory bucket counting for the dashboard charts.

use super::dtos::{AgeBracketCount, AgeDistribution, GenderByCulto};
use ecclesia_core::entities::sea_orm_active_enums::{Culto, Gender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    Child,
    Teen,
    YoungAdult,
    Adult,
    MiddleAge,
    Senior,
    Unknown,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 7] = [
        AgeBracket::Child,
        AgeBracket::Teen,
        AgeBracket::YoungAdult,
        AgeBracket::Adult,
        AgeBracket::MiddleAge,
        AgeBracket::Senior,
        AgeBracket::Unknown,
    ];

    pub fn from_age(age: Option<i32>) -> Self {
        match age {
            Some(a) if a < 0 => AgeBracket::Unknown,
            Some(0..=12) => AgeBracket::Child,
            Some(13..=17) => AgeBracket::Teen,
            Some(18..=25) => AgeBracket::YoungAdult,
            Some(26..=35) => AgeBracket::Adult,
            Some(36..=50) => AgeBracket::MiddleAge,
            Some(_) => AgeBracket::Senior,
            None => AgeBracket::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Child => "0-12",
            AgeBracket::Teen => "13-17",
            AgeBracket::YoungAdult => "18-25",
            AgeBracket::Adult => "26-35",
            AgeBracket::MiddleAge => "36-50",
            AgeBracket::Senior => "51+",
            AgeBracket::Unknown => "nao-informado",
        }
    }

    fn index(&self) -> usize {
        AgeBracket::ALL
            .iter()
            .position(|b| b == self)
            .unwrap_or(AgeBracket::ALL.len() - 1)
    }
}

/// Gender counts for every service slot, in slot order. Slots without visitors report zeros.
pub fn gender_by_culto<I>(rows: I) -> Vec<GenderByCulto>
where
    I: IntoIterator<Item = (Culto, Gender)>,
{
    let mut buckets: Vec<GenderByCulto> = Culto::ALL
        .iter()
        .map(|culto| GenderByCulto {
            culto: *culto,
            masculino: 0,
            feminino: 0,
            total: 0,
        })
        .collect();

    for (culto, gender) in rows {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.culto == culto) {
            match gender {
                Gender::Masculino => bucket.masculino += 1,
                Gender::Feminino => bucket.feminino += 1,
            }
            bucket.total += 1;
        }
    }

    buckets
}

pub fn age_distribution<I>(ages: I) -> AgeDistribution
where
    I: IntoIterator<Item = Option<i32>>,
{
    let mut counts = [0u64; AgeBracket::ALL.len()];
    let mut total = 0;

    for age in ages {
        counts[AgeBracket::from_age(age).index()] += 1;
        total += 1;
    }

    AgeDistribution {
        brackets: AgeBracket::ALL
            .iter()
            .zip(counts)
            .map(|(bracket, count)| AgeBracketCount {
                bracket: bracket.label().to_string(),
                count,
            })
            .collect(),
        total,
    }
}
