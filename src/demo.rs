//! Built-in scripts run by `svec --demo`, each paired with the output it must produce.

pub struct Scenario {
    pub name: &'static str,
    pub source: &'static str,
    pub expected: &'static [&'static str],
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "push_and_erase",
        source: PUSH_AND_ERASE,
        expected: &["1 2 3", "3", "1 3", "2"],
    },
    Scenario {
        name: "resize_fill",
        source: RESIZE_FILL,
        expected: &["5 5 5 0 0", "5 5", "5"],
    },
    Scenario {
        name: "growth_policy",
        source: GROWTH_POLICY,
        expected: &["0", "1", "2", "4", "4", "8"],
    },
    Scenario {
        name: "checked_access",
        source: CHECKED_ACCESS,
        expected: &["30", "error: index 3 out of range for length 3"],
    },
    Scenario {
        name: "insert_erase_round_trip",
        source: INSERT_ERASE_ROUND_TRIP,
        expected: &["1 2 42 3", "1 2 3"],
    },
];

const PUSH_AND_ERASE: &str = r#"
    push 1
    push 2
    push 3
    show
    len
    erase 1     # the element holding 2
    show
    len
"#;

const RESIZE_FILL: &str = r#"
    init 5 5 5
    resize 5
    show
    resize 2
    show
    capacity    # shrinking keeps the buffer
"#;

const GROWTH_POLICY: &str = r#"
    capacity
    push 1
    capacity
    push 2
    capacity
    push 3
    capacity
    push 4
    capacity
    push 5
    capacity
"#;

const CHECKED_ACCESS: &str = r#"
    init 10 20 30
    at 2
    at 3
"#;

const INSERT_ERASE_ROUND_TRIP: &str = r#"
    init 1 2 3
    insert 2 42
    show
    erase 2
    show
"#;
