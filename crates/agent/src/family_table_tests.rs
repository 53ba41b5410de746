// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    a = { AgentFamily::A, ExtraHardening::SandboxEnv },
    b = { AgentFamily::B, ExtraHardening::YoloFlag },
    c = { AgentFamily::C, ExtraHardening::None },
    d = { AgentFamily::D, ExtraHardening::None },
)]
fn family_table_hardening_matches_spec_table(family: AgentFamily, expected: ExtraHardening) {
    assert_eq!(FamilyTable::for_family(family).extra_hardening, expected);
}
