//! Credentials config.

use super::*;

use std::path::Path;

const USER_ID_KEY: &str = "userId=";
const AUTH_TOKEN_KEY: &str = "authToken=";
const TEMPLATE: &str =
    "userId=<PUT USER ID HERE>\nauthToken=<PUT AUTH TOKEN HERE>\n";

/// Service credentials read from the key=value config file.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub user_id: String,
    pub auth_token: String,
}

impl Credentials {
    /// Read credentials from `path`. Returns `None` when the file is
    /// missing or either value is empty.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path).with_context(|| {
            format!("unable to read config file {}", path.display())
        })?;
        Ok(Self::parse(&data))
    }

    /// Parse `userId=`/`authToken=` lines. The first occurrence of each
    /// key wins; unknown lines are ignored.
    pub fn parse(data: &str) -> Option<Self> {
        let mut user_id: Option<&str> = None;
        let mut auth_token: Option<&str> = None;
        for line in data.lines() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if user_id.is_none() {
                if let Some(value) = line.strip_prefix(USER_ID_KEY) {
                    user_id = Some(value);
                    continue;
                }
            }
            if auth_token.is_none() {
                if let Some(value) = line.strip_prefix(AUTH_TOKEN_KEY) {
                    auth_token = Some(value);
                }
            }
        }
        match (user_id, auth_token) {
            (Some(user_id), Some(auth_token))
                if !user_id.is_empty() && !auth_token.is_empty() =>
            {
                Some(Self {
                    user_id: user_id.to_string(),
                    auth_token: auth_token.to_string(),
                })
            }
            _ => None,
        }
    }

    /// Overwrite `path` with placeholder values for the user to fill in.
    pub fn write_template(path: &Path) -> Result<()> {
        std::fs::write(path, TEMPLATE).with_context(|| {
            format!("unable to write config template {}", path.display())
        })
    }
}
