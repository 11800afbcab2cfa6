use std::env;
use tracing::warn;

/// Resolve an API key from its configured spec.
///
/// A spec is either the name of an environment variable (`GEMINI_API_KEY`) or
/// a string using `${VAR}` references, expanded against the environment.
pub fn resolve_api_key(owner: &str, spec: Option<&str>) -> Option<String> {
    let raw = spec.map(str::trim).filter(|raw| !raw.is_empty())?;

    if raw.contains('$') {
        return match shellexpand::env(raw) {
            Ok(expanded) if !expanded.trim().is_empty() => Some(expanded.into_owned()),
            Ok(_) => None,
            Err(err) => {
                warn!(owner, spec = raw, %err, "API key reference could not be expanded");
                None
            }
        };
    }

    match env::var(raw) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => None,
        Err(err) => {
            warn!(
                owner,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}
