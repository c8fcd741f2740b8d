// src/packages/scripts.rs

//! Lifecycle script locations inside Slackware packages
//!
//! pkgtools only run `install/doinst.sh`; the other three names are the
//! conventional homes for the remaining hooks so that they survive a round
//! trip through the tgz format.

use crate::packages::traits::ScriptletPhase;

/// Hook phase → member path inside the package
pub const SCRIPT_FILES: [(ScriptletPhase, &str); 4] = [
    (ScriptletPhase::PreInstall, "install/predoinst.sh"),
    (ScriptletPhase::PostInstall, "install/doinst.sh"),
    (ScriptletPhase::PreRemove, "install/predelete.sh"),
    (ScriptletPhase::PostRemove, "install/delete.sh"),
];
