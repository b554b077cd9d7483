//! Property tests for the allocation engine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use budget_planner::calculation::Planner;
use budget_planner::models::{
    Constraints, FixedExpense, Income, Money, PlanningInput, Preferences, VariableExpense,
};

// ============================================================================
// Strategies
// ============================================================================

/// Whole-dollar amounts.
fn dollars() -> impl Strategy<Value = i64> {
    0i64..5_000
}

/// Amounts with cents.
fn cents() -> impl Strategy<Value = Money> {
    (0i64..500_000).prop_map(|n| Money::new(Decimal::new(n, 2)))
}

fn round_to_strategy() -> impl Strategy<Value = Money> {
    prop_oneof![
        Just(Money::new(Decimal::new(25, 2))),
        Just(Money::new(Decimal::new(50, 2))),
        Just(Money::from(1)),
        Just(Money::from(5)),
        Just(Money::from(10)),
    ]
}

fn savings_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=30).prop_map(|n| Decimal::new(n, 2))
}

/// (floor, cap, priority) per variable, whole dollars.
fn variable_specs() -> impl Strategy<Value = Vec<(Option<i64>, Option<i64>, i32)>> {
    prop::collection::vec(
        (
            prop::option::of(0i64..800),
            prop::option::of(0i64..1_500),
            0i32..4,
        ),
        0..6,
    )
}

fn build_variables(specs: &[(Option<i64>, Option<i64>, i32)]) -> Vec<VariableExpense> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (min, max, priority))| VariableExpense {
            name: format!("Category {}", i),
            min_amount: min.map(Money::from),
            max_amount: max.map(Money::from),
            priority: *priority,
        })
        .collect()
}

fn build_input(
    income: Money,
    fixed: Vec<Money>,
    variables: Vec<VariableExpense>,
    savings_rate_min: Decimal,
    round_to: Money,
) -> PlanningInput {
    PlanningInput {
        incomes: vec![Income {
            name: "Job".to_string(),
            amount: income,
        }],
        fixed: fixed
            .into_iter()
            .enumerate()
            .map(|(i, amount)| FixedExpense {
                name: format!("Fixed {}", i),
                amount,
                essential: true,
            })
            .collect(),
        variables,
        preferences: Preferences {
            savings_rate_min,
            round_to,
        },
        constraints: Constraints::default(),
    }
}

fn is_multiple(value: Money, step: Money) -> bool {
    (value.amount() % step.amount()).is_zero()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Expenses, savings and the leftover add back up to income whenever
    /// income covers the fixed costs.
    #[test]
    fn prop_balance_identity(
        income in dollars(),
        fixed in prop::collection::vec(dollars(), 0..4),
        specs in variable_specs(),
        rate in savings_rate_strategy(),
    ) {
        let fixed: Vec<Money> = fixed.into_iter().map(|d| Money::from(d / 4)).collect();
        let fixed_total: Money = fixed.iter().sum();
        prop_assume!(Money::from(income) >= fixed_total);

        let input = build_input(Money::from(income), fixed, build_variables(&specs), rate, Money::from(1));
        let summary = Planner::new().build_plan(&input).summary;

        prop_assert_eq!(
            summary.total_expenses + summary.savings + summary.remaining,
            summary.total_income
        );
    }

    /// The leftover is never negative and no item is zero or negative.
    #[test]
    fn prop_remaining_and_items_positive(
        income in cents(),
        fixed in prop::collection::vec(cents(), 0..4),
        specs in variable_specs(),
        rate in savings_rate_strategy(),
        round_to in round_to_strategy(),
    ) {
        let input = build_input(income, fixed, build_variables(&specs), rate, round_to);
        let result = Planner::new().build_plan(&input);

        prop_assert!(!result.summary.remaining.is_negative());
        for item in &result.items {
            prop_assert!(item.allocated.is_positive(), "{} allocated {}", item.category, item.allocated);
        }
    }

    /// Capped categories never receive more than their cap.
    #[test]
    fn prop_caps_respected(
        income in cents(),
        fixed in prop::collection::vec(cents(), 0..3),
        specs in variable_specs(),
        rate in savings_rate_strategy(),
        round_to in round_to_strategy(),
    ) {
        let variables = build_variables(&specs);
        let input = build_input(income, fixed, variables.clone(), rate, round_to);
        let result = Planner::new().build_plan(&input);

        for variable in &variables {
            if let (Some(max), Some(item)) = (variable.max_amount, result.item(&variable.name)) {
                prop_assert!(item.allocated <= max, "{} got {} over cap {}", variable.name, item.allocated, max);
            }
        }
    }

    /// Every floor is met when income covers fixed costs and all floors.
    #[test]
    fn prop_floors_met_when_affordable(
        fixed in prop::collection::vec(dollars(), 0..3),
        specs in variable_specs(),
        extra in dollars(),
    ) {
        // Caps at least as large as floors.
        let specs: Vec<_> = specs
            .into_iter()
            .map(|(min, max, priority)| (min, max.map(|m| m + min.unwrap_or(0)), priority))
            .collect();
        let variables = build_variables(&specs);

        let fixed: Vec<Money> = fixed.into_iter().map(Money::from).collect();
        let fixed_total: Money = fixed.iter().sum();
        let floors: Money = variables.iter().filter_map(|v| v.min_amount).sum();
        let income = fixed_total + floors + Money::from(extra);

        let input = build_input(income, fixed, variables.clone(), Decimal::ZERO, Money::from(1));
        let result = Planner::new().build_plan(&input);

        for variable in &variables {
            if let Some(min) = variable.min_amount.filter(|m| m.is_positive()) {
                let allocated = result.item(&variable.name).map(|i| i.allocated).unwrap_or(Money::ZERO);
                prop_assert!(allocated >= min, "{} got {} under floor {}", variable.name, allocated, min);
            }
        }
    }

    /// Every allocation and headline total is a multiple of the step.
    #[test]
    fn prop_rounding_law(
        income in cents(),
        fixed in prop::collection::vec(cents(), 0..4),
        specs in variable_specs(),
        rate in savings_rate_strategy(),
        round_to in round_to_strategy(),
    ) {
        let input = build_input(income, fixed, build_variables(&specs), rate, round_to);
        let result = Planner::new().build_plan(&input);

        for item in &result.items {
            prop_assert!(is_multiple(item.allocated, round_to), "{} = {}", item.category, item.allocated);
        }
        prop_assert!(is_multiple(result.summary.total_income, round_to));
        prop_assert!(is_multiple(result.summary.total_expenses, round_to));
    }

    /// The same input always produces the same plan.
    #[test]
    fn prop_idempotent(
        income in cents(),
        fixed in prop::collection::vec(cents(), 0..4),
        specs in variable_specs(),
        rate in savings_rate_strategy(),
        round_to in round_to_strategy(),
    ) {
        let input = build_input(income, fixed, build_variables(&specs), rate, round_to);
        let planner = Planner::new();

        prop_assert_eq!(planner.build_plan(&input), planner.build_plan(&input));
    }
}
