use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::input::InputError;

/// Shape `users_list.json` was stored in, so rewrites keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsersListFormat {
    Logins,
    LoginObjects,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsersList {
    pub users: Vec<String>,
    pub format: UsersListFormat,
}

pub fn load_users_list(path: &Path) -> Result<UsersList, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    parse_users_list(&value)
}

/// Accepts `["login", ...]` or `[{"login": "..."}, ...]`.
pub fn parse_users_list(value: &Value) -> Result<UsersList, InputError> {
    let unsupported = || {
        InputError::InvalidInput(
            "users list format not supported: expected list of strings or list of {login} objects"
                .to_string(),
        )
    };
    let items = value.as_array().ok_or_else(unsupported)?;

    if items.iter().all(Value::is_string) {
        let users = items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        return Ok(UsersList {
            users,
            format: UsersListFormat::Logins,
        });
    }

    if items.iter().all(Value::is_object) {
        let users = items
            .iter()
            .filter_map(|v| v.get("login").and_then(Value::as_str))
            .filter(|login| !login.is_empty())
            .map(str::to_string)
            .collect();
        return Ok(UsersList {
            users,
            format: UsersListFormat::LoginObjects,
        });
    }

    Err(unsupported())
}

/// Like [`load_users_list`], but a cohort with no members is an error.
pub fn load_cohort(path: &Path) -> Result<UsersList, InputError> {
    let list = load_users_list(path)?;
    if list.users.is_empty() {
        return Err(InputError::EmptyCohort(path.to_path_buf()));
    }
    Ok(list)
}

pub fn save_users_list(
    path: &Path,
    users: &[String],
    format: UsersListFormat,
) -> Result<(), InputError> {
    let value = match format {
        UsersListFormat::Logins => Value::from(users.to_vec()),
        UsersListFormat::LoginObjects => Value::Array(
            users
                .iter()
                .map(|u| serde_json::json!({ "login": u }))
                .collect(),
        ),
    };
    let io_err = |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, &value).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    w.flush().map_err(io_err)?;
    Ok(())
}
