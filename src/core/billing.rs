use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::Intervention;

/// Display name used when an intervention carries no store name snapshot.
pub const UNKNOWN_STORE: &str = "Magasin Inconnu";

/// Billable interventions of one partner store — a view over the
/// intervention set, rebuilt whenever it or the filters change, never
/// persisted.
#[derive(Debug, Clone)]
pub struct BillingGroup<'a> {
    pub store_id: Uuid,
    /// Store display name, taken from the first member's snapshot.
    pub store_name: String,
    /// Billable interventions, in input order.
    pub interventions: Vec<&'a Intervention>,
}

impl<'a> BillingGroup<'a> {
    /// Members whose start date falls within the given period.
    ///
    /// A group left empty by the period filter is not rendered at all;
    /// callers skip groups where this returns an empty vec.
    pub fn visible(&self, month: u32, year: i32) -> Vec<&'a Intervention> {
        filter_by_period(self.interventions.iter().copied(), month, year)
    }
}

/// Group billable interventions by partner store.
///
/// Keeps exactly the interventions satisfying [`Intervention::is_billable`]
/// (status Terminée, no invoice, non-nil store reference), keyed by store
/// id. Pure function over its input; iteration order is stable (sorted by
/// store id), member order is input order.
pub fn compute_billing_groups(interventions: &[Intervention]) -> BTreeMap<Uuid, BillingGroup<'_>> {
    let mut groups: BTreeMap<Uuid, BillingGroup<'_>> = BTreeMap::new();
    for intervention in interventions.iter().filter(|i| i.is_billable()) {
        // is_billable guarantees a non-nil store reference
        let Some(store_id) = intervention.store_ref() else {
            continue;
        };
        groups
            .entry(store_id)
            .or_insert_with(|| BillingGroup {
                store_id,
                store_name: intervention
                    .store_name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_STORE.to_string()),
                interventions: Vec::new(),
            })
            .interventions
            .push(intervention);
    }
    groups
}

/// Retain interventions whose start date falls in the given month and/or
/// year. `month == 0` means "any month", `year == 0` means "any year" —
/// with both zero this is the identity.
///
/// The *start* date is the billing reference date: interventions are
/// billed based on when work began, not when it finished.
pub fn filter_by_period<'a, I>(interventions: I, month: u32, year: i32) -> Vec<&'a Intervention>
where
    I: IntoIterator<Item = &'a Intervention>,
{
    interventions
        .into_iter()
        .filter(|i| {
            if year != 0 && i.start_date.year() != year {
                return false;
            }
            if month != 0 && i.start_date.month() != month {
                return false;
            }
            true
        })
        .collect()
}

/// Sum of the totals of the group members whose id is in `selected`.
pub fn selected_total(group: &BillingGroup<'_>, selected: &BTreeSet<Uuid>) -> Decimal {
    group
        .interventions
        .iter()
        .filter(|i| selected.contains(&i.id))
        .map(|i| i.total)
        .sum()
}
