//! Credenciales: obtención de bearer tokens de vida corta.
//!
//! `DefaultCredential` prueba en orden:
//! 1. `ClientSecretCredential` (si `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` y
//!    `AZURE_CLIENT_SECRET` están definidos),
//! 2. `AzureCliCredential` (`az account get-access-token`).
//!
//! El primer token obtenido se cachea por scope hasta 5 minutos antes de su
//! expiración.

use std::collections::HashMap;
use std::env;
use std::process::Command;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use log::{debug, warn};
use serde::Deserialize;

use crate::error::ClientError;

/// Scope de Resource Manager usado por el control plane.
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
const REFRESH_MARGIN_MINUTES: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: DateTime<Utc>,
}

impl AccessToken {
    /// Usable si quedan más de 5 minutos de validez.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_on - Duration::minutes(REFRESH_MARGIN_MINUTES) > now
    }
}

pub trait TokenCredential {
    fn get_token(&self, scope: &str) -> Result<AccessToken, ClientError>;
}

impl<T: TokenCredential + ?Sized> TokenCredential for Box<T> {
    fn get_token(&self, scope: &str) -> Result<AccessToken, ClientError> {
        (**self).get_token(scope)
    }
}

// ---------- service principal ----------

#[derive(Clone)]
pub struct ClientSecretCredential {
    pub tenant_id: String,
    pub client_id: String,
    client_secret: String,
    pub authority: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl ClientSecretCredential {
    pub fn new(tenant_id: impl Into<String>, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { tenant_id: tenant_id.into(),
               client_id: client_id.into(),
               client_secret: client_secret.into(),
               authority: DEFAULT_AUTHORITY.to_string() }
    }

    /// `None` si falta alguna de las tres variables.
    pub fn from_env() -> Option<Self> {
        let var = |k: &str| env::var(k).ok().filter(|v| !v.is_empty());
        let mut cred = Self::new(var("AZURE_TENANT_ID")?, var("AZURE_CLIENT_ID")?, var("AZURE_CLIENT_SECRET")?);
        if let Some(authority) = var("AZURE_AUTHORITY_HOST") {
            cred.authority = authority.trim_end_matches('/').to_string();
        }
        Some(cred)
    }

    pub fn token_url(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.authority, self.tenant_id)
    }
}

impl TokenCredential for ClientSecretCredential {
    fn get_token(&self, scope: &str) -> Result<AccessToken, ClientError> {
        let resp = ureq::post(&self.token_url()).send_form(&[("grant_type", "client_credentials"),
                                                             ("client_id", self.client_id.as_str()),
                                                             ("client_secret", self.client_secret.as_str()),
                                                             ("scope", scope)]);
        let resp = match resp {
            Ok(r) => r,
            Err(ureq::Error::Status(status, r)) => {
                let body = r.into_string().unwrap_or_default();
                return Err(ClientError::Authentication(format!("token endpoint returned {status}: {body}")));
            }
            Err(e) => return Err(ClientError::Transport(e.to_string())),
        };
        let parsed: TokenResponse = resp.into_json()
                                        .map_err(|e| ClientError::InvalidResponse(format!("token response: {e}")))?;
        Ok(AccessToken { token: parsed.access_token,
                         expires_on: Utc::now() + Duration::seconds(parsed.expires_in) })
    }
}

// ---------- Azure CLI ----------

#[derive(Debug, Clone, Default)]
pub struct AzureCliCredential;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliToken {
    access_token: String,
    #[serde(default)]
    expires_on: Option<String>,
    /// Epoch en segundos; sólo lo emiten versiones recientes del CLI.
    #[serde(default, rename = "expires_on")]
    expires_on_epoch: Option<i64>,
}

impl AzureCliCredential {
    /// `https://x/.default` -> `https://x`
    fn resource_for(scope: &str) -> &str {
        scope.strip_suffix("/.default").unwrap_or(scope)
    }

    pub(crate) fn parse_output(stdout: &str) -> Result<AccessToken, ClientError> {
        let parsed: CliToken = serde_json::from_str(stdout).map_err(|e| ClientError::InvalidResponse(format!("az output: {e}")))?;
        let expires_on = match (parsed.expires_on_epoch, parsed.expires_on.as_deref()) {
            (Some(epoch), _) => Utc.timestamp_opt(epoch, 0)
                                   .single()
                                   .ok_or_else(|| ClientError::InvalidResponse(format!("bad expiry epoch {epoch}")))?,
            (None, Some(text)) => parse_local_expiry(text)?,
            (None, None) => return Err(ClientError::InvalidResponse("az output has no expiry".into())),
        };
        Ok(AccessToken { token: parsed.access_token, expires_on })
    }
}

fn parse_local_expiry(text: &str) -> Result<DateTime<Utc>, ClientError> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| ClientError::InvalidResponse(format!("bad expiry '{text}': {e}")))?;
    Local.from_local_datetime(&naive)
         .earliest()
         .map(|dt| dt.with_timezone(&Utc))
         .ok_or_else(|| ClientError::InvalidResponse(format!("ambiguous expiry '{text}'")))
}

impl TokenCredential for AzureCliCredential {
    fn get_token(&self, scope: &str) -> Result<AccessToken, ClientError> {
        let program = if cfg!(windows) { "az.cmd" } else { "az" };
        let output = Command::new(program).args(["account", "get-access-token", "--output", "json", "--resource", Self::resource_for(scope)])
                                          .output()
                                          .map_err(|e| ClientError::CredentialUnavailable(format!("azure cli not runnable: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClientError::CredentialUnavailable(format!("azure cli: {}", stderr.trim())));
        }
        Self::parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}

// ---------- cadena por defecto ----------

pub struct DefaultCredential {
    sources: Vec<(&'static str, Box<dyn TokenCredential>)>,
    cache: Mutex<HashMap<String, AccessToken>>,
}

impl DefaultCredential {
    pub fn new() -> Self {
        let mut sources: Vec<(&'static str, Box<dyn TokenCredential>)> = Vec::new();
        if let Some(sp) = ClientSecretCredential::from_env() {
            sources.push(("environment", Box::new(sp) as Box<dyn TokenCredential>));
        }
        sources.push(("azure-cli", Box::new(AzureCliCredential) as Box<dyn TokenCredential>));
        Self::with_sources(sources)
    }

    pub fn with_sources(sources: Vec<(&'static str, Box<dyn TokenCredential>)>) -> Self {
        Self { sources,
               cache: Mutex::new(HashMap::new()) }
    }

    fn cached(&self, scope: &str) -> Option<AccessToken> {
        let cache = self.cache.lock().ok()?;
        cache.get(scope).filter(|t| t.is_fresh(Utc::now())).cloned()
    }
}

impl Default for DefaultCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCredential for DefaultCredential {
    fn get_token(&self, scope: &str) -> Result<AccessToken, ClientError> {
        if let Some(token) = self.cached(scope) {
            return Ok(token);
        }
        let mut failures = Vec::new();
        for (label, source) in &self.sources {
            match source.get_token(scope) {
                Ok(token) => {
                    debug!("token for {scope} obtained from {label}");
                    if let Ok(mut cache) = self.cache.lock() {
                        cache.insert(scope.to_string(), token.clone());
                    }
                    return Ok(token);
                }
                Err(e) => {
                    warn!("credential {label} failed: {e}");
                    failures.push(format!("{label}: {e}"));
                }
            }
        }
        Err(ClientError::CredentialUnavailable(failures.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn boxed<T: TokenCredential + 'static>(t: T) -> Box<dyn TokenCredential> {
        Box::new(t)
    }

    struct Failing;
    impl TokenCredential for Failing {
        fn get_token(&self, _scope: &str) -> Result<AccessToken, ClientError> {
            Err(ClientError::CredentialUnavailable("nope".into()))
        }
    }

    struct Counting {
        calls: Rc<Cell<u32>>,
        ttl_minutes: i64,
    }
    impl TokenCredential for Counting {
        fn get_token(&self, _scope: &str) -> Result<AccessToken, ClientError> {
            self.calls.set(self.calls.get() + 1);
            Ok(AccessToken { token: format!("t{}", self.calls.get()),
                             expires_on: Utc::now() + Duration::minutes(self.ttl_minutes) })
        }
    }

    #[test]
    fn chain_falls_through_and_caches() {
        let calls = Rc::new(Cell::new(0));
        let chain = DefaultCredential::with_sources(vec![("failing", boxed(Failing)),
                                                         ("counting", boxed(Counting { calls: calls.clone(), ttl_minutes: 60 }))]);
        assert_eq!(chain.get_token(MANAGEMENT_SCOPE).unwrap().token, "t1");
        assert_eq!(chain.get_token(MANAGEMENT_SCOPE).unwrap().token, "t1");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn nearly_expired_token_is_refreshed() {
        let calls = Rc::new(Cell::new(0));
        let chain = DefaultCredential::with_sources(vec![("counting", boxed(Counting { calls: calls.clone(), ttl_minutes: 2 }))]);
        chain.get_token(MANAGEMENT_SCOPE).unwrap();
        assert_eq!(chain.get_token(MANAGEMENT_SCOPE).unwrap().token, "t2");
    }

    #[test]
    fn all_failing_sources_are_reported() {
        let chain = DefaultCredential::with_sources(vec![("a", boxed(Failing)), ("b", boxed(Failing))]);
        let err = chain.get_token(MANAGEMENT_SCOPE).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("a: ") && msg.contains("b: "), "{msg}");
    }

    #[test]
    fn cli_output_with_epoch() {
        let t = AzureCliCredential::parse_output(r#"{"accessToken":"abc","expiresOn":"2030-01-01 00:00:00.000000","expires_on":1893456000}"#).unwrap();
        assert_eq!(t.token, "abc");
        assert_eq!(t.expires_on.timestamp(), 1893456000);
    }

    #[test]
    fn cli_output_with_local_time_only() {
        let t = AzureCliCredential::parse_output(r#"{"accessToken":"abc","expiresOn":"2030-01-01 00:00:00.000000"}"#).unwrap();
        assert!(t.is_fresh(Utc::now()));
    }

    #[test]
    fn resource_strips_default_suffix() {
        assert_eq!(AzureCliCredential::resource_for(MANAGEMENT_SCOPE), "https://management.azure.com");
    }
}
