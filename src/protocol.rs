//! Line-delimited JSON request loop.
//!
//! Each input line is one request object tagged by `op`; each output line is
//! one response object echoing the request's `id`. A line that cannot be
//! decoded produces an error response and the loop keeps going, so a single
//! bad request never takes the session down.

use crate::error::DictionaryError;
use crate::service::DictionaryService;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    ListApps {
        #[serde(default)]
        search_dir: Option<PathBuf>,
    },
    Overview {
        app: String,
    },
    Suite {
        app: String,
        name: String,
    },
    Command {
        app: String,
        name: String,
    },
    Class {
        app: String,
        name: String,
    },
    Enumeration {
        app: String,
        name: String,
    },
    Search {
        app: String,
        query: String,
    },
    Export {
        app: String,
    },
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Response {
    pub id: Value,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn success(id: Value, text: String) -> Self {
        Self {
            id,
            ok: true,
            text: Some(text),
            error: None,
        }
    }

    fn failure(id: Value, error: String) -> Self {
        Self {
            id,
            ok: false,
            text: None,
            error: Some(error),
        }
    }
}

/// Run one request against the service.
pub fn dispatch(service: &DictionaryService, request: &Request) -> Result<String, DictionaryError> {
    match request {
        Request::ListApps { search_dir } => service.list_apps(search_dir.as_deref()),
        Request::Overview { app } => service.overview(app),
        Request::Suite { app, name } => service.suite_detail(app, name),
        Request::Command { app, name } => service.command_detail(app, name),
        Request::Class { app, name } => service.class_detail(app, name),
        Request::Enumeration { app, name } => service.enumeration_detail(app, name),
        Request::Search { app, query } => service.search(app, query),
        Request::Export { app } => service.export(app),
    }
}

/// Decode one request line and answer it.
pub fn handle_line(service: &DictionaryService, line: &str) -> Response {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => return Response::failure(Value::Null, format!("invalid JSON: {err}")),
    };
    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request = match Request::deserialize(value) {
        Ok(request) => request,
        Err(err) => return Response::failure(id, format!("invalid request: {err}")),
    };

    debug!(?request, "dispatching request");
    match dispatch(service, &request) {
        Ok(text) => Response::success(id, text),
        Err(err) => Response::failure(id, err.to_string()),
    }
}

/// Answer requests from `reader` until end of input.
pub fn serve<R: BufRead, W: Write>(
    service: &DictionaryService,
    mut reader: R,
    mut writer: W,
) -> Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .context("failed to read request")?;
        if bytes == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let response = handle_line(service, trimmed);
        serde_json::to_writer(&mut writer, &response).context("failed to encode response")?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .context("failed to write response")?;
    }
    Ok(())
}
