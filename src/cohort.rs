//! Cohort selection: which (state, brand) pairs get modeled.

use crate::core::Observation;

/// A single modeling unit: one state and one brand within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    pub state: String,
    pub brand: String,
}

/// Rank keys by descending count, ties broken by first appearance.
///
/// The stable sort over first-seen grouping order reproduces the tie policy
/// of a grouped count sorted descending.
fn ranked_by_volume<'a, I>(keys: I, limit: usize) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for key in keys {
        let entry = counts.entry(key).or_insert(0);
        if *entry == 0 {
            order.push(key);
        }
        *entry += 1;
    }

    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(limit).map(String::from).collect()
}

/// Select the top `top_states` states by observation volume, and within each
/// the top `top_brands` brands. Output size is at most the product of the
/// two limits, in state-major order.
pub fn select_cohorts(
    observations: &[Observation],
    top_states: usize,
    top_brands: usize,
) -> Vec<Cohort> {
    let states = ranked_by_volume(observations.iter().map(|o| o.state.as_str()), top_states);

    let mut cohorts = Vec::new();
    for state in states {
        let brands = ranked_by_volume(
            observations
                .iter()
                .filter(|o| o.state == state)
                .map(|o| o.brand.as_str()),
            top_brands,
        );
        for brand in brands {
            cohorts.push(Cohort {
                state: state.clone(),
                brand,
            });
        }
    }
    cohorts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(state: &str, brand: &str, year: i32) -> Observation {
        Observation {
            entity_id: "h".to_string(),
            state: state.to_string(),
            brand: brand.to_string(),
            year,
        }
    }

    #[test]
    fn ranks_states_by_total_volume() {
        let mut observations = Vec::new();
        for _ in 0..5 {
            observations.push(obs("CA", "Toyota", 2018));
        }
        for _ in 0..3 {
            observations.push(obs("TX", "Ford", 2018));
        }
        observations.push(obs("NY", "Honda", 2018));

        let cohorts = select_cohorts(&observations, 2, 3);
        let states: Vec<_> = cohorts.iter().map(|c| c.state.as_str()).collect();
        assert_eq!(states, vec!["CA", "TX"]);
    }

    #[test]
    fn ranks_brands_within_each_state() {
        let mut observations = Vec::new();
        for _ in 0..4 {
            observations.push(obs("CA", "Toyota", 2018));
        }
        for _ in 0..2 {
            observations.push(obs("CA", "Honda", 2019));
        }
        observations.push(obs("CA", "Tesla", 2020));
        observations.push(obs("CA", "Kia", 2020));

        let cohorts = select_cohorts(&observations, 10, 3);
        let brands: Vec<_> = cohorts.iter().map(|c| c.brand.as_str()).collect();
        // Tesla and Kia tie at 1; Tesla appeared first.
        assert_eq!(brands, vec!["Toyota", "Honda", "Tesla"]);
    }

    #[test]
    fn ties_break_by_first_appearance() {
        let observations = vec![
            obs("WA", "Subaru", 2018),
            obs("OR", "Subaru", 2018),
            obs("ID", "Subaru", 2018),
        ];
        let cohorts = select_cohorts(&observations, 2, 1);
        let states: Vec<_> = cohorts.iter().map(|c| c.state.as_str()).collect();
        assert_eq!(states, vec!["WA", "OR"]);
    }

    #[test]
    fn never_selects_fewer_than_available() {
        let observations: Vec<_> = (0..10)
            .map(|i| obs(&format!("S{i}"), "Brand", 2018))
            .collect();
        let cohorts = select_cohorts(&observations, 10, 3);
        assert_eq!(cohorts.len(), 10);
    }

    #[test]
    fn respects_both_limits() {
        let mut observations = Vec::new();
        for s in 0..12 {
            for b in 0..5 {
                observations.push(obs(&format!("S{s}"), &format!("B{b}"), 2018));
            }
        }
        let cohorts = select_cohorts(&observations, 10, 3);
        assert_eq!(cohorts.len(), 30);
    }

    #[test]
    fn empty_observations_yield_no_cohorts() {
        assert!(select_cohorts(&[], 10, 3).is_empty());
    }
}
