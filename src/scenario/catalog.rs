//! Hand-authored scenario recipes.
//!
//! `p(parent, child, ..)` labels a parentship, `s(a, b, ..)` a siblingship.
//! Facts labeled input + solution are given to the model; solution-only
//! facts are what it has to infer.

use super::{Fact, Scenario};
use crate::graph::{Label, NodeId, RelationType};

const GIVEN: &[Label] = &[Label::Input, Label::Solution];
const INFER: &[Label] = &[Label::Solution];

const fn p(parent: NodeId, child: NodeId, labels: &'static [Label]) -> Fact {
    Fact {
        relation_type: RelationType::Parentship,
        roleplayers: [parent, child],
        labels,
    }
}

const fn s(sibling_1: NodeId, sibling_2: NodeId, labels: &'static [Label]) -> Fact {
    Fact {
        relation_type: RelationType::Siblingship,
        roleplayers: [sibling_1, sibling_2],
        labels,
    }
}

// Index 4 (inferring a parentship from a sibling's parent) is retired and
// intentionally absent.
pub(super) static CATALOG: &[Scenario] = &[
    // ---- 3-person graphs ----
    Scenario {
        index: 0,
        num_people: 3,
        description: "Shared parent implies siblings",
        facts: &[p(0, 1, GIVEN), p(0, 2, GIVEN), s(1, 2, INFER)],
    },
    Scenario {
        index: 1,
        num_people: 3,
        description: "All mutual siblings, no parents",
        facts: &[s(0, 1, GIVEN), s(1, 2, GIVEN), s(0, 2, INFER)],
    },
    Scenario {
        index: 2,
        num_people: 3,
        description: "Parent chain, nothing to infer",
        facts: &[p(0, 1, GIVEN), p(1, 2, GIVEN)],
    },
    Scenario {
        index: 3,
        num_people: 3,
        description: "Parent and unrelated sibling pair",
        facts: &[p(0, 1, GIVEN), s(1, 2, GIVEN)],
    },
    // ---- 4-person graphs ----
    Scenario {
        index: 5,
        num_people: 4,
        description: "Shared parent with a grandchild",
        facts: &[p(0, 1, GIVEN), p(0, 2, GIVEN), p(2, 3, GIVEN), s(1, 2, INFER)],
    },
    Scenario {
        index: 6,
        num_people: 4,
        description: "Shared parent with a grandchild (repeat)",
        facts: &[p(0, 1, GIVEN), p(0, 2, GIVEN), p(2, 3, GIVEN), s(1, 2, INFER)],
    },
    Scenario {
        index: 7,
        num_people: 4,
        description: "Shared parent with a grandparent",
        facts: &[p(0, 1, GIVEN), p(0, 2, GIVEN), p(3, 0, GIVEN), s(1, 2, INFER)],
    },
    Scenario {
        index: 8,
        num_people: 4,
        description: "Three-generation parent chain",
        facts: &[p(0, 1, GIVEN), p(1, 2, GIVEN), p(2, 3, GIVEN)],
    },
    Scenario {
        index: 9,
        num_people: 4,
        description: "One parent of three siblings",
        facts: &[
            p(0, 1, GIVEN),
            p(0, 2, GIVEN),
            p(0, 3, GIVEN),
            s(1, 2, INFER),
            s(2, 3, INFER),
            s(1, 3, INFER),
        ],
    },
    Scenario {
        index: 10,
        num_people: 4,
        description: "All mutual siblings, no parents",
        facts: &[
            s(0, 1, GIVEN),
            s(1, 2, GIVEN),
            s(2, 3, GIVEN),
            s(0, 2, INFER),
            s(0, 3, INFER),
            s(1, 3, INFER),
        ],
    },
    Scenario {
        index: 11,
        num_people: 4,
        description: "All mutual siblings, no parents (repeat)",
        facts: &[
            s(0, 1, GIVEN),
            s(1, 2, GIVEN),
            s(2, 3, GIVEN),
            s(0, 2, INFER),
            s(0, 3, INFER),
            s(1, 3, INFER),
        ],
    },
    Scenario {
        index: 12,
        num_people: 4,
        description: "Half siblings through different parents",
        facts: &[p(0, 1, GIVEN), p(0, 2, GIVEN), p(3, 1, GIVEN), s(1, 2, INFER)],
    },
];
