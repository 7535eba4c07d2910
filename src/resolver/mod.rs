//! Target resolution against the service control plane
//!
//! Before any load is generated the app and function names from the
//! configuration are resolved to the opaque function id the invoke endpoint
//! expects. Resolution talks to the v2 control plane API of the service.

use crate::error::{AppError, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for control plane requests
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Maps app and function names to the id used by the invoke endpoint
pub trait Resolver {
    /// Resolve the function id for the given app and function names
    fn resolve(&self, app_name: &str, function_name: &str) -> Result<String>;
}

/// App list entry from the control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppItem {
    pub id: String,
    pub name: String,
}

/// Function list entry from the control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FnItem {
    pub id: String,
    pub name: String,
}

/// Paged list response from the control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListPage<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Resolver backed by the v2 control plane API
pub struct ControlPlaneResolver {
    /// HTTP client for requests
    client: Client,
    /// Base URL of the service, without trailing slash
    base_url: String,
    /// Whether verbose logging is enabled
    verbose: bool,
}

impl ControlPlaneResolver {
    /// Create a new resolver for the given service base URL
    pub fn new(host: &str, verbose: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(RESOLVE_TIMEOUT)
            .user_agent(format!(
                "function-latency-tester/{} (https://github.com/MaurUppi/function-latency-tester)",
                crate::VERSION
            ))
            .build()
            .map_err(|e| AppError::resolution(format!("Failed to create control plane client: {}", e)))?;

        Ok(Self {
            client,
            base_url: host.trim_end_matches('/').to_string(),
            verbose,
        })
    }

    /// Look up the app id for an app name
    fn lookup_app(&self, app_name: &str) -> Result<String> {
        let url = format!("{}/v2/apps", self.base_url);

        if self.verbose {
            eprintln!("[RESOLVE] Looking up app '{}' at {}", app_name, url);
        }

        let response = self.client
            .get(&url)
            .query(&[("name", app_name)])
            .send()?;

        if !response.status().is_success() {
            return Err(AppError::resolution(format!(
                "control plane returned status {} for app lookup",
                response.status().as_u16()
            )));
        }

        let page: ListPage<AppItem> = response
            .json()
            .map_err(|e| AppError::resolution(format!("Failed to parse app list response: {}", e)))?;

        match page.items.into_iter().next() {
            Some(app) => {
                if self.verbose {
                    eprintln!("[RESOLVE] App '{}' has id {}", app.name, app.id);
                }
                Ok(app.id)
            }
            None => Err(AppError::resolution("app not found")),
        }
    }

    /// Look up the function id within an app
    fn lookup_fn(&self, app_id: &str, function_name: &str) -> Result<String> {
        let url = format!("{}/v2/fns", self.base_url);

        if self.verbose {
            eprintln!("[RESOLVE] Looking up function '{}' in app {} at {}", function_name, app_id, url);
        }

        let response = self.client
            .get(&url)
            .query(&[("app_id", app_id), ("name", function_name)])
            .send()?;

        if !response.status().is_success() {
            return Err(AppError::resolution(format!(
                "control plane returned status {} for function lookup",
                response.status().as_u16()
            )));
        }

        let page: ListPage<FnItem> = response
            .json()
            .map_err(|e| AppError::resolution(format!("Failed to parse function list response: {}", e)))?;

        // The name parameter filters server-side, but only an exact name match
        // counts. With duplicates the last match wins.
        let mut fn_id = String::new();
        for item in page.items {
            if item.name == function_name {
                fn_id = item.id;
            }
        }

        if fn_id.is_empty() {
            return Err(AppError::resolution("fn not found"));
        }

        if self.verbose {
            eprintln!("[RESOLVE] Function '{}' has id {}", function_name, fn_id);
        }

        Ok(fn_id)
    }
}

impl Resolver for ControlPlaneResolver {
    fn resolve(&self, app_name: &str, function_name: &str) -> Result<String> {
        let app_id = self.lookup_app(app_name)?;
        self.lookup_fn(&app_id, function_name)
    }
}
