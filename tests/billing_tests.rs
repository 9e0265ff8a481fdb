use atelier::core::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn billable(id: u128, store: Uuid, start: NaiveDate, total: Decimal) -> Intervention {
    let mut i = Intervention::new(
        Uuid::from_u128(id),
        Uuid::from_u128(0x1000 + id),
        Uuid::from_u128(0x2000 + id),
        start,
    );
    i.status = InterventionStatus::Done;
    i.store_id = Some(store);
    i.store_name = Some("Electro Plus".into());
    i.total = total;
    i
}

// --- compute_billing_groups ---

#[test]
fn groups_contain_only_billable_interventions() {
    let s1 = store_id(1);
    let mut unbilled_not_done = billable(10, s1, date(2025, 3, 1), dec!(100));
    unbilled_not_done.status = InterventionStatus::InProgress;

    let mut already_billed = billable(11, s1, date(2025, 3, 2), dec!(100));
    already_billed.invoice_id = Some(Uuid::from_u128(99));

    let mut no_store = billable(12, s1, date(2025, 3, 3), dec!(100));
    no_store.store_id = None;

    let mut nil_store = billable(13, s1, date(2025, 3, 4), dec!(100));
    nil_store.store_id = Some(Uuid::nil());

    let ok = billable(14, s1, date(2025, 3, 5), dec!(100));

    let interventions = vec![unbilled_not_done, already_billed, no_store, nil_store, ok];
    let groups = compute_billing_groups(&interventions);

    assert_eq!(groups.len(), 1);
    let group = &groups[&s1];
    assert_eq!(group.interventions.len(), 1);
    assert_eq!(group.interventions[0].id, Uuid::from_u128(14));
}

#[test]
fn to_invoice_status_is_not_billable() {
    // Only Terminée counts as completed for billing; A facturer is a
    // queue marker, not a completion state.
    let mut i = billable(1, store_id(1), date(2025, 1, 1), dec!(50));
    i.status = InterventionStatus::ToInvoice;
    assert!(!i.is_billable());
    assert!(compute_billing_groups(std::slice::from_ref(&i)).is_empty());
}

#[test]
fn every_billable_intervention_lands_in_exactly_one_group() {
    let s1 = store_id(1);
    let s2 = store_id(2);
    let interventions = vec![
        billable(1, s1, date(2025, 1, 10), dec!(10)),
        billable(2, s2, date(2025, 1, 11), dec!(20)),
        billable(3, s1, date(2025, 1, 12), dec!(30)),
    ];
    let groups = compute_billing_groups(&interventions);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[&s1].interventions.len(), 2);
    assert_eq!(groups[&s2].interventions.len(), 1);
    for (key, group) in &groups {
        assert_eq!(*key, group.store_id);
        for i in &group.interventions {
            assert_eq!(i.store_ref(), Some(*key));
        }
    }
}

#[test]
fn group_takes_store_name_from_first_member() {
    let s1 = store_id(1);
    let mut first = billable(1, s1, date(2025, 1, 1), dec!(10));
    first.store_name = Some("Magasin Atlas".into());
    let mut second = billable(2, s1, date(2025, 1, 2), dec!(10));
    second.store_name = Some("Atlas (renommé)".into());

    let interventions = vec![first, second];
    let groups = compute_billing_groups(&interventions);
    assert_eq!(groups[&s1].store_name, "Magasin Atlas");
}

#[test]
fn group_without_name_snapshot_gets_fallback() {
    let s1 = store_id(1);
    let mut i = billable(1, s1, date(2025, 1, 1), dec!(10));
    i.store_name = None;
    let interventions = vec![i];
    let groups = compute_billing_groups(&interventions);
    assert_eq!(groups[&s1].store_name, UNKNOWN_STORE);
}

// --- filter_by_period ---

#[test]
fn period_filter_with_both_zero_is_identity() {
    let interventions = vec![
        billable(1, store_id(1), date(2024, 12, 31), dec!(10)),
        billable(2, store_id(1), date(2025, 6, 15), dec!(10)),
    ];
    let filtered = filter_by_period(&interventions, 0, 0);
    assert_eq!(filtered.len(), interventions.len());
}

#[test]
fn period_filter_matches_on_start_date_not_end_date() {
    let mut i = billable(1, store_id(1), date(2025, 3, 28), dec!(10));
    i.end_date = Some(date(2025, 4, 2));
    let interventions = vec![i];

    assert_eq!(filter_by_period(&interventions, 3, 2025).len(), 1);
    // Work finished in April, but billing goes by when it began.
    assert!(filter_by_period(&interventions, 4, 2025).is_empty());
}

#[test]
fn period_filter_month_only_and_year_only() {
    let interventions = vec![
        billable(1, store_id(1), date(2024, 3, 1), dec!(10)),
        billable(2, store_id(1), date(2025, 3, 1), dec!(10)),
        billable(3, store_id(1), date(2025, 7, 1), dec!(10)),
    ];

    let march_any_year = filter_by_period(&interventions, 3, 0);
    assert_eq!(march_any_year.len(), 2);

    let year_2025 = filter_by_period(&interventions, 0, 2025);
    assert_eq!(year_2025.len(), 2);

    let march_2025 = filter_by_period(&interventions, 3, 2025);
    assert_eq!(march_2025.len(), 1);
    assert_eq!(march_2025[0].id, Uuid::from_u128(2));
}

#[test]
fn group_emptied_by_filter_reports_no_visible_rows() {
    let s1 = store_id(1);
    let interventions = vec![billable(1, s1, date(2025, 3, 1), dec!(10))];
    let groups = compute_billing_groups(&interventions);
    assert!(groups[&s1].visible(12, 2025).is_empty());
}

// --- SelectionState ---

#[test]
fn toggle_is_its_own_inverse() {
    let s1 = store_id(1);
    let a = Uuid::from_u128(0xa);
    let mut state = SelectionState::new();

    state.toggle(s1, a);
    assert!(state.is_selected(s1, a));
    state.toggle(s1, a);
    assert!(!state.is_selected(s1, a));
    assert_eq!(state.count(s1), 0);
}

#[test]
fn toggle_does_not_affect_other_stores() {
    let s1 = store_id(1);
    let s2 = store_id(2);
    let a = Uuid::from_u128(0xa);
    let mut state = SelectionState::new();

    state.toggle(s2, a);
    state.toggle(s1, a);
    state.toggle(s1, a);

    assert!(state.is_selected(s2, a));
    assert!(!state.is_selected(s1, a));
}

#[test]
fn toggle_all_flips_between_all_and_none() {
    let s1 = store_id(1);
    let visible = [Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)];
    let mut state = SelectionState::new();

    state.toggle_all_visible(s1, &visible);
    assert_eq!(state.count(s1), 3);

    // All selected: the same action now deselects everything visible.
    state.toggle_all_visible(s1, &visible);
    assert_eq!(state.count(s1), 0);

    state.toggle_all_visible(s1, &visible);
    assert_eq!(state.count(s1), 3);
}

#[test]
fn toggle_all_completes_a_partial_selection() {
    let s1 = store_id(1);
    let visible = [Uuid::from_u128(1), Uuid::from_u128(2)];
    let mut state = SelectionState::new();

    state.toggle(s1, visible[0]);
    state.toggle_all_visible(s1, &visible);
    assert_eq!(state.count(s1), 2);
}

#[test]
fn toggle_all_keeps_selections_hidden_by_the_filter() {
    let s1 = store_id(1);
    let hidden = Uuid::from_u128(0xdead);
    let visible = [Uuid::from_u128(1), Uuid::from_u128(2)];
    let mut state = SelectionState::new();

    // Selected while another period was displayed.
    state.toggle(s1, hidden);

    state.toggle_all_visible(s1, &visible);
    assert!(state.is_selected(s1, hidden));
    assert_eq!(state.count(s1), 3);

    // Deselecting "all visible" only removes the visible ones.
    state.toggle_all_visible(s1, &visible);
    assert!(state.is_selected(s1, hidden));
    assert_eq!(state.count(s1), 1);
}

// --- selected_total ---

#[test]
fn selected_total_sums_only_selected_members() {
    let s1 = store_id(1);
    let interventions = vec![
        billable(1, s1, date(2025, 3, 1), dec!(150.50)),
        billable(2, s1, date(2025, 3, 2), dec!(49.50)),
        billable(3, s1, date(2025, 3, 3), dec!(999.99)),
    ];
    let groups = compute_billing_groups(&interventions);
    let group = &groups[&s1];

    let mut state = SelectionState::new();
    state.toggle(s1, Uuid::from_u128(1));
    state.toggle(s1, Uuid::from_u128(2));

    assert_eq!(selected_total(group, state.selected(s1)), dec!(200.00));
}

#[test]
fn selected_total_is_zero_for_empty_selection() {
    let s1 = store_id(1);
    let interventions = vec![billable(1, s1, date(2025, 3, 1), dec!(150.50))];
    let groups = compute_billing_groups(&interventions);
    let state = SelectionState::new();
    assert_eq!(selected_total(&groups[&s1], state.selected(s1)), dec!(0));
}
