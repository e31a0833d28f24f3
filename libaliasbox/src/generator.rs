//! Alias address generation
//!
//! Pure functions that turn user input into a new, collision-free alias id.
//! Nothing here touches the clock or storage; randomness comes from the
//! caller-provided RNG so the reducer can seed it from state.

use std::collections::HashSet;

use rand::Rng;

/// Length of a randomly drawn local part
pub const RANDOM_LOCAL_LEN: usize = 10;

const LOCAL_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// First counter tried when disambiguating (`name-2@host`)
const FIRST_COUNTER: u64 = 2;

/// Split raw input into `(local_part, host)` on the first `@`
///
/// The host falls back to `base_domain` when there is no `@` or nothing
/// after it. Surrounding whitespace is trimmed and hosts are lower-cased;
/// local parts are kept as typed.
pub fn split_address(raw: &str, base_domain: &str) -> (String, String) {
    let raw = raw.trim();
    let base = normalize_domain(base_domain);

    match raw.split_once('@') {
        Some((local, host)) if !host.trim().is_empty() => {
            (local.trim().to_string(), host.trim().to_lowercase())
        }
        Some((local, _)) => (local.trim().to_string(), base),
        None => (raw.to_string(), base),
    }
}

/// Generate a new alias id from user input
///
/// Returns `None` for blank input and never fails otherwise. An empty local
/// part (input like `@example.com`) is replaced with a random one drawn
/// from `rng`. If the candidate is already in `existing`, a numeric suffix
/// is appended until it is unique.
pub fn generate<'a, R>(
    raw_input: &str,
    existing: impl IntoIterator<Item = &'a str>,
    base_domain: &str,
    rng: &mut R,
) -> Option<String>
where
    R: Rng + ?Sized,
{
    if raw_input.trim().is_empty() {
        return None;
    }

    let taken: HashSet<&str> = existing.into_iter().collect();
    let (mut local, host) = split_address(raw_input, base_domain);
    if local.is_empty() {
        local = random_local_part(rng);
    }

    let candidate = compose(&local, &host);
    if !taken.contains(candidate.as_str()) {
        return Some(candidate);
    }

    Some(next_free(strip_counter(&local), &host, &taken))
}

/// Derive a sibling of an existing alias
///
/// Keeps the host and the base local part (a trailing `-N` counter is
/// dropped) and picks the lowest free counter, so `shop@x.io` yields
/// `shop-2@x.io`, then `shop-3@x.io`, and so on. The result is never a
/// member of `existing`.
pub fn generate_additional<'a>(
    base_alias: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> String {
    let taken: HashSet<&str> = existing.into_iter().collect();
    let (local, host) = match base_alias.trim().split_once('@') {
        Some((local, host)) => (local, host.to_lowercase()),
        None => (base_alias.trim(), String::new()),
    };

    next_free(strip_counter(local), &host, &taken)
}

/// Check that a base domain can be appended to a local part
pub fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.trim();
    !domain.is_empty() && !domain.contains('@') && !domain.chars().any(char::is_whitespace)
}

/// Canonical form of a base domain: trimmed and lower-cased, the same
/// form `split_address` gives the fallback host
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().to_lowercase()
}

/// Draw a random lowercase alphanumeric local part
pub fn random_local_part<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..RANDOM_LOCAL_LEN)
        .map(|_| LOCAL_CHARSET[rng.gen_range(0..LOCAL_CHARSET.len())] as char)
        .collect()
}

fn compose(local: &str, host: &str) -> String {
    if host.is_empty() {
        local.to_string()
    } else {
        format!("{}@{}", local, host)
    }
}

fn next_free(stem: &str, host: &str, taken: &HashSet<&str>) -> String {
    let mut counter = FIRST_COUNTER;
    loop {
        let candidate = compose(&format!("{}-{}", stem, counter), host);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}

/// `shop-3` -> `shop`; anything without a numeric counter is returned as is
fn strip_counter(local: &str) -> &str {
    match local.rsplit_once('-') {
        Some((stem, counter))
            if !stem.is_empty()
                && !counter.is_empty()
                && !counter.starts_with('0')
                && counter.chars().all(|c| c.is_ascii_digit()) =>
        {
            stem
        }
        _ => local,
    }
}
