//! feedsweep entry selection and Feedly API access.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

mod client;
mod entry;
mod select;

#[cfg(test)]
mod tests;

pub use client::*;
pub use entry::*;
pub use select::*;
