//! Reference resolution per RFC 3986 §5.3.

use crate::error::ResolveError;
use crate::uri::Uri;

/// Resolves `reference` against `base`.
///
/// The transform is an ordered decision list and the order is load-bearing:
/// a reference carrying its own scheme wins outright; otherwise its
/// authority, then its path, decide how much of the base is inherited. The
/// fragment always comes from the reference, never from the base.
pub(crate) fn resolve(base: &Uri, reference: &Uri) -> Result<Uri, ResolveError> {
    let Some(base_scheme) = base.scheme() else {
        return Err(ResolveError::BaseNotAbsolute);
    };

    let (scheme, authority, path, query);

    if let Some(r_scheme) = reference.scheme() {
        scheme = r_scheme.clone();
        authority = reference.authority().cloned();
        path = reference.path().remove_dot_segments();
        query = reference.query().cloned();
    } else if reference.authority().is_some() {
        scheme = base_scheme.clone();
        authority = reference.authority().cloned();
        path = reference.path().remove_dot_segments();
        query = reference.query().cloned();
    } else if reference.path().is_empty() {
        scheme = base_scheme.clone();
        authority = base.authority().cloned();
        path = base.path().clone();
        query = reference.query().cloned().or_else(|| base.query().cloned());
    } else if reference.path().is_absolute() {
        scheme = base_scheme.clone();
        authority = base.authority().cloned();
        path = reference.path().remove_dot_segments();
        query = reference.query().cloned();
    } else {
        scheme = base_scheme.clone();
        authority = base.authority().cloned();
        path = base
            .path()
            .merged_with(reference.path(), base.authority().is_some())
            .remove_dot_segments();
        query = reference.query().cloned();
    }

    Ok(Uri::from_parts(
        Some(scheme),
        authority,
        path,
        query,
        reference.fragment().cloned(),
    ))
}
