//! Git authentication callbacks
//!
//! Credentials are tried in this order, depending on what the remote allows:
//! - default (negotiate/NTLM) credentials
//! - the SSH agent, then unencrypted keys in `~/.ssh/`
//! - git credential helpers, then anonymous access

use git2::{Cred, CredentialType, Error, ErrorClass, ErrorCode, RemoteCallbacks};

const SSH_KEY_NAMES: &[&str] = &["id_ed25519", "id_rsa", "id_ecdsa"];

fn auth_error(message: &str) -> Error {
    Error::new(ErrorCode::Auth, ErrorClass::Http, message)
}

fn ssh_key_from_disk(username: &str) -> Result<Cred, Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    SSH_KEY_NAMES
        .iter()
        .map(|name| (ssh_dir.join(name), ssh_dir.join(format!("{name}.pub"))))
        .filter(|(private_key, _)| private_key.exists())
        .find_map(|(private_key, public_key)| {
            let public_key = public_key.exists().then_some(public_key.as_path());
            Cred::ssh_key(username, public_key, &private_key, None).ok()
        })
        .ok_or_else(|| auth_error("no usable SSH key found"))
}

fn ssh_credentials(username_from_url: Option<&str>) -> Result<Cred, Error> {
    let username = username_from_url.unwrap_or("git");
    Cred::ssh_key_from_agent(username).or_else(|_| ssh_key_from_disk(username))
}

fn plaintext_credentials(url: &str, username_from_url: Option<&str>) -> Result<Cred, Error> {
    let config = git2::Config::open_default().or_else(|_| git2::Config::new())?;

    if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
        return Ok(cred);
    }

    // Public repositories accept any user with an empty password
    Cred::userpass_plaintext(username_from_url.unwrap_or("anonymous"), "")
}

/// Install credential callbacks on `callbacks`
pub fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks) {
    callbacks.credentials(|url, username_from_url, allowed| {
        if allowed.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }
        if allowed.contains(CredentialType::SSH_KEY) {
            return ssh_credentials(username_from_url);
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return plaintext_credentials(url, username_from_url);
        }
        Err(auth_error("authentication failed"))
    });
}
