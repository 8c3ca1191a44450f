use crate::package::Package;
use crate::types::RepositoryType;

/// Distinct `distribution/component` groupings derived from package file
/// paths, in first-seen order. RPM and Helm repositories are flat, so they
/// have no sub-repositories.
pub fn sub_repositories(packages: &[Package], type_: RepositoryType) -> Vec<String> {
    if matches!(type_, RepositoryType::Rpm | RepositoryType::Helm) {
        return Vec::new();
    }

    let mut subs = Vec::new();
    for package in packages {
        let path = package.file_path.replacen("pool/", "", 1);
        let sub = path.split('/').take(2).collect::<Vec<_>>().join("/");
        if !subs.contains(&sub) {
            subs.push(sub);
        }
    }
    subs
}

/// Packages whose `file_path` falls under `sub`; the whole input when `sub`
/// is empty.
///
/// The match is a byte-literal prefix, not segment aware: a `stable` filter
/// also selects `pool/stable-extra/...`.
pub fn sub_repository_packages<'a>(
    packages: &'a [Package],
    type_: RepositoryType,
    sub: &str,
) -> Vec<&'a Package> {
    packages
        .iter()
        .filter(|package| {
            if sub.is_empty() {
                return true;
            }
            match type_ {
                RepositoryType::Deb => package.file_path.starts_with(&format!("pool/{sub}")),
                _ => package.file_path.starts_with(sub),
            }
        })
        .collect()
}
