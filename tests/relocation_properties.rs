use proptest::prelude::*;
use shift_roster::{Day, Employee, RelocationOutcome, Roster, Shift, ShiftStore};
use std::sync::Arc;

const NAMES: [&str; 4] = ["Alexandre", "Elise", "Samuel", "Nora"];

fn arb_day() -> impl Strategy<Value = Day> {
    (0usize..7).prop_map(|i| Day::ALL[i])
}

// Half-hour grid keeps collisions between generated shifts likely.
fn arb_shift() -> impl Strategy<Value = Shift> {
    (0u32..40, 1u32..8).prop_map(|(start, len)| {
        let end = (start + len).min(47);
        let fmt = |slot: u32| format!("{:02}:{:02}", slot / 2, (slot % 2) * 30);
        Shift::parse(&fmt(start), &fmt(end)).unwrap()
    })
}

fn arb_employee(name: &'static str) -> impl Strategy<Value = Employee> {
    prop::collection::vec((arb_day(), arb_shift()), 0..10).prop_map(move |entries| {
        let mut employee = Employee::new(name);
        for (day, shift) in entries {
            if !employee.shifts_on(day).contains(&shift) {
                employee = employee.with_shift(day, shift);
            }
        }
        employee
    })
}

fn arb_roster() -> impl Strategy<Value = Roster> {
    (
        arb_employee(NAMES[0]),
        arb_employee(NAMES[1]),
        arb_employee(NAMES[2]),
        arb_employee(NAMES[3]),
    )
        .prop_map(|(a, b, c, d)| Roster::new(vec![a, b, c, d]).unwrap())
}

fn count(slots: &[Shift], shift: &Shift) -> usize {
    slots.iter().filter(|s| *s == shift).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn same_day_is_identity(
        roster in arb_roster(),
        who in 0usize..4,
        day in arb_day(),
        shift in arb_shift(),
    ) {
        let mut store = ShiftStore::new(roster);
        let before = store.snapshot();

        let outcome = store.relocate(NAMES[who], day, day, &shift).unwrap();

        prop_assert_eq!(outcome, RelocationOutcome::Unchanged);
        prop_assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn relocation_is_exclusive_and_duplicate_free(
        roster in arb_roster(),
        who in 0usize..4,
        from in arb_day(),
        to in arb_day(),
        shift in arb_shift(),
    ) {
        prop_assume!(from != to);
        let name = NAMES[who];
        let mut store = ShiftStore::new(roster);
        let dest_len_before = store.snapshot().employee(name).unwrap().shifts_on(to).len();
        let already_there = store.snapshot().employee(name).unwrap().shifts_on(to).contains(&shift);
        let in_source = store.snapshot().employee(name).unwrap().shifts_on(from).contains(&shift);
        let before = store.snapshot();

        let outcome = store.relocate(name, from, to, &shift).unwrap();

        let after = store.snapshot();
        let employee = after.employee(name).unwrap();
        prop_assert_eq!(count(employee.shifts_on(from), &shift), 0);
        prop_assert_eq!(count(employee.shifts_on(to), &shift), 1);
        if already_there && !in_source {
            prop_assert_eq!(outcome, RelocationOutcome::Unchanged);
            prop_assert!(Arc::ptr_eq(&before, &after));
        } else if already_there {
            prop_assert_eq!(outcome, RelocationOutcome::Merged);
            prop_assert_eq!(employee.shifts_on(to).len(), dest_len_before);
        } else {
            prop_assert_eq!(outcome, RelocationOutcome::Moved);
            prop_assert_eq!(employee.shifts_on(to).len(), dest_len_before + 1);
        }
    }

    #[test]
    fn other_employees_never_change(
        roster in arb_roster(),
        who in 0usize..4,
        from in arb_day(),
        to in arb_day(),
        shift in arb_shift(),
    ) {
        let mut store = ShiftStore::new(roster);
        let before = store.snapshot();

        store.relocate(NAMES[who], from, to, &shift).unwrap();

        let after = store.snapshot();
        for (i, name) in NAMES.iter().enumerate() {
            if i != who {
                prop_assert!(Arc::ptr_eq(
                    before.employee_handle(name).unwrap(),
                    after.employee_handle(name).unwrap()
                ));
            }
        }
    }

    #[test]
    fn roster_stays_free_of_duplicates(
        roster in arb_roster(),
        moves in prop::collection::vec((0usize..4, arb_day(), arb_day(), arb_shift()), 1..20),
    ) {
        let mut store = ShiftStore::new(roster);
        for (who, from, to, shift) in &moves {
            store.relocate(NAMES[*who], *from, *to, shift).unwrap();
        }

        let snapshot = store.snapshot();
        for employee in snapshot.employees() {
            for day in Day::ALL {
                let shifts = employee.shifts_on(day);
                for shift in shifts {
                    prop_assert_eq!(count(shifts, shift), 1);
                }
            }
        }
        // whatever was applied, a rebuilt roster still validates
        let rebuilt: Vec<Employee> = snapshot.employees().cloned().collect();
        prop_assert!(Roster::new(rebuilt).is_ok());
    }
}
