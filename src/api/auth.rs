//! OAuth2 authorization-code flow with PKCE.
//!
//! A [`LoginAttempt`] owns the anti-CSRF state and the PKCE verifier for one
//! login. Validating the callback consumes the attempt, so a state value can
//! only ever be accepted once.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;
use sha2::{Digest, Sha256};
use url::Url;

use crate::api::types::TokenResponse;
use crate::error::{Error, Result};

/// Default host serving the consent page.
pub const AUTH_BASE: &str = "https://twitter.com";

/// Scopes needed to read bookmarks and refresh the token.
pub const SCOPES: [&str; 4] = ["tweet.read", "bookmark.read", "users.read", "offline.access"];

const AUTHORIZE_PATH: &str = "/i/oauth2/authorize";
const TOKEN_PATH: &str = "/2/oauth2/token";
const REVOKE_PATH: &str = "/2/oauth2/revoke";

/// PKCE verifier length (RFC 7636 allows 43..=128).
const VERIFIER_LENGTH: usize = 64;

/// Access/refresh token pair returned by a successful exchange.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
}

/// Authorization code plus the verifier that must accompany it.
#[derive(Debug)]
pub struct AuthorizationGrant {
    code: String,
    code_verifier: String,
}

/// A registered OAuth2 client application.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    client_secret: Option<String>,
    redirect_uri: String,
    auth_base: String,
    api_base: String,
}

/// State for a single login.
#[derive(Debug)]
pub struct LoginAttempt {
    state: String,
    code_verifier: String,
    authorization_url: Url,
}

/// Generate a PKCE code verifier.
pub fn generate_code_verifier() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(VERIFIER_LENGTH)
        .map(char::from)
        .collect()
}

/// S256 code challenge for a verifier.
pub fn code_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

impl OAuthClient {
    pub fn new(
        client_id: String,
        client_secret: Option<String>,
        redirect_uri: String,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            client_id,
            client_secret,
            redirect_uri,
            auth_base: auth_base.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Start a new login with fresh state and verifier.
    pub fn begin_login(&self) -> Result<LoginAttempt> {
        let state = uuid::Uuid::new_v4().simple().to_string();
        let code_verifier = generate_code_verifier();

        let mut authorization_url = Url::parse(&format!("{}{}", self.auth_base, AUTHORIZE_PATH))?;
        authorization_url
            .query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &SCOPES.join(" "))
            .append_pair("state", &state)
            .append_pair("code_challenge", &code_challenge(&code_verifier))
            .append_pair("code_challenge_method", "S256");

        Ok(LoginAttempt {
            state,
            code_verifier,
            authorization_url,
        })
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange(&self, grant: AuthorizationGrant) -> Result<TokenPair> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", grant.code.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("code_verifier", grant.code_verifier.as_str()),
            ("client_id", self.client_id.as_str()),
        ];

        let text = self.post_form(TOKEN_PATH, &form).await?;
        let token: TokenResponse = serde_json::from_str(&text)?;
        tracing::debug!("Granted scopes: {:?}", token.scope);

        Ok(TokenPair {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
        })
    }

    /// Revoke an access token.
    pub async fn revoke(&self, access_token: &str) -> Result<()> {
        let form = [
            ("token", access_token),
            ("token_type_hint", "access_token"),
            ("client_id", self.client_id.as_str()),
        ];

        self.post_form(REVOKE_PATH, &form).await?;
        Ok(())
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!("POST {}", url);

        let mut request = self.http.post(&url).form(form);
        if let Some(secret) = &self.client_secret {
            request = request.basic_auth(&self.client_id, Some(secret));
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Session(format!("HTTP {} from {}: {}", status, path, text)));
        }

        Ok(text)
    }
}

impl LoginAttempt {
    /// URL the user opens to grant access.
    pub fn authorization_url(&self) -> &Url {
        &self.authorization_url
    }

    /// Validate the redirected callback URL and extract the grant.
    pub fn verify_callback(self, callback_url: &str) -> Result<AuthorizationGrant> {
        let url = Url::parse(callback_url.trim())?;

        let mut code = None;
        let mut state = None;
        let mut error = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            return Err(Error::Session(format!("Authorization denied: {}", error)));
        }

        if state.as_deref() != Some(self.state.as_str()) {
            return Err(Error::Session("State isn't matching".into()));
        }

        let code = code.ok_or_else(|| Error::Session("Callback carries no code".into()))?;

        Ok(AuthorizationGrant {
            code,
            code_verifier: self.code_verifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OAuthClient {
        OAuthClient::new(
            "client-abc".into(),
            None,
            "http://127.0.0.1:3000/callback".into(),
            AUTH_BASE,
            "https://api.twitter.com",
        )
        .unwrap()
    }

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_code_challenge_rfc7636_vector() {
        // Appendix B of RFC 7636.
        assert_eq!(
            code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn test_verifier_shape() {
        let verifier = generate_code_verifier();
        assert_eq!(verifier.len(), VERIFIER_LENGTH);
        assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(verifier, generate_code_verifier());
    }

    #[test]
    fn test_authorization_url_parameters() {
        let attempt = client().begin_login().unwrap();
        let url = attempt.authorization_url();

        assert!(url.as_str().starts_with("https://twitter.com/i/oauth2/authorize?"));
        assert_eq!(param(url, "client_id").as_deref(), Some("client-abc"));
        assert_eq!(param(url, "code_challenge_method").as_deref(), Some("S256"));
        assert_eq!(
            param(url, "scope").as_deref(),
            Some("tweet.read bookmark.read users.read offline.access")
        );
        assert_eq!(param(url, "state"), Some(attempt.state.clone()));
        assert_eq!(
            param(url, "code_challenge"),
            Some(code_challenge(&attempt.code_verifier))
        );
    }

    #[test]
    fn test_each_attempt_has_fresh_state() {
        let c = client();
        let a = c.begin_login().unwrap();
        let b = c.begin_login().unwrap();
        assert_ne!(a.state, b.state);
    }

    #[test]
    fn test_verify_callback_accepts_matching_state() {
        let attempt = client().begin_login().unwrap();
        let callback = format!(
            "http://127.0.0.1:3000/callback?state={}&code=xyz",
            attempt.state
        );
        let verifier = attempt.code_verifier.clone();
        let grant = attempt.verify_callback(&callback).unwrap();
        assert_eq!(grant.code, "xyz");
        assert_eq!(grant.code_verifier, verifier);
    }

    #[test]
    fn test_verify_callback_rejects_wrong_state() {
        let attempt = client().begin_login().unwrap();
        let result =
            attempt.verify_callback("http://127.0.0.1:3000/callback?state=my-state&code=xyz");
        assert!(matches!(result, Err(Error::Session(_))));
    }

    #[test]
    fn test_verify_callback_reports_denial() {
        let attempt = client().begin_login().unwrap();
        let callback = format!(
            "http://127.0.0.1:3000/callback?state={}&error=access_denied",
            attempt.state
        );
        let err = attempt.verify_callback(&callback).unwrap_err();
        assert!(err.to_string().contains("access_denied"));
    }
}
