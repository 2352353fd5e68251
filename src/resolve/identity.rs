use itertools::Itertools;
use tracing::debug;

use crate::api::models::{Identity, IdentityRef, User};
use crate::catalog::ConversionScope;
use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::models::IdentityModel;
use crate::types::IdentityType;

/// Resolve a configured identity to every matching server-side ID.
///
/// Users are looked up one by one through `user_lookup` (by email or ID).
/// Groups and context attributes are matched against `catalog` by exact name
/// and case-insensitive type, and all matches are returned so that duplicate
/// names grant every identity carrying them.
pub fn resolve_identity_ids<F>(
    name: &str,
    identity_type: IdentityType,
    catalog: &[Identity],
    user_lookup: F,
) -> Result<Vec<String>, ProviderError>
where
    F: FnOnce(&str) -> Result<User, ProviderError>,
{
    let not_found = || ProviderError::IdentityNotFound {
        name: name.to_string(),
        identity_type: identity_type.terraform_name().to_string(),
    };

    match identity_type {
        IdentityType::User => match user_lookup(name) {
            Ok(user) => Ok(vec![user.id]),
            Err(err @ ProviderError::Canceled(_)) => Err(err),
            Err(err) => {
                debug!(event = "Resolve", phase = "UserLookup", name, error = %err);
                Err(not_found())
            }
        },
        IdentityType::Group | IdentityType::ContextAttribute => {
            let wire = identity_type.wire_name();
            let ids: Vec<String> = catalog
                .iter()
                .filter(|entry| entry.name == name && entry.identity_type.eq_ignore_ascii_case(&wire))
                .map(|entry| entry.id.clone())
                .collect();
            if ids.is_empty() {
                return Err(not_found());
            }
            if ids.len() > 1 {
                debug!(event = "Resolve", phase = "Identity", name, matches = ids.len());
            }
            Ok(ids)
        }
    }
}

/// Resolve a server-side identity reference back to its configured form.
///
/// Users come back as their email.
pub fn resolve_identity_name<F>(
    id: &str,
    identity_type: IdentityType,
    catalog: &[Identity],
    user_lookup: F,
) -> Result<IdentityModel, ProviderError>
where
    F: FnOnce(&str) -> Result<User, ProviderError>,
{
    let not_found = || ProviderError::IdentityIdNotFound {
        id: id.to_string(),
        identity_type: identity_type.terraform_name().to_string(),
    };

    match identity_type {
        IdentityType::User => match user_lookup(id) {
            Ok(user) => Ok(IdentityModel::new(user.email, identity_type)),
            Err(err @ ProviderError::Canceled(_)) => Err(err),
            Err(_) => Err(not_found()),
        },
        IdentityType::Group | IdentityType::ContextAttribute => {
            let wire = identity_type.wire_name();
            catalog
                .iter()
                .find(|entry| entry.id == id && entry.identity_type.eq_ignore_ascii_case(&wire))
                .map(|entry| IdentityModel::new(entry.name.clone(), identity_type))
                .ok_or_else(not_found)
        }
    }
}

/// Resolve a configured identity set into deduplicated API references.
///
/// The bulk identity list is only requested when a non-user identity is
/// present. Every failure is reported.
pub(crate) fn identity_refs_for(
    attribute: &str,
    identities: &[IdentityModel],
    scope: &ConversionScope<'_>,
) -> Result<Vec<IdentityRef>, Diagnostics> {
    let mut diags = Diagnostics::new();
    let parsed: Vec<(&IdentityModel, IdentityType)> = identities
        .iter()
        .filter_map(|identity| {
            diags
                .capture(attribute, IdentityType::parse(&identity.identity_type))
                .map(|t| (identity, t))
        })
        .collect();

    let catalog = catalog_for(attribute, parsed.iter().map(|(_, t)| *t), scope, &mut diags);

    let mut refs = Vec::new();
    for (identity, identity_type) in parsed {
        let catalog = match (identity_type, catalog) {
            (IdentityType::User, _) => &[][..],
            (_, Some(catalog)) => catalog,
            (_, None) => continue,
        };
        match resolve_identity_ids(&identity.name, identity_type, catalog, |n| scope.user(n)) {
            Ok(ids) => refs.extend(ids.into_iter().map(|id| IdentityRef {
                id,
                identity_type: identity_type.wire_name(),
            })),
            Err(err @ ProviderError::Canceled(_)) => {
                diags.add_error(attribute, err);
                return Err(diags);
            }
            Err(err) => diags.add_error(attribute, err),
        }
    }

    diags.into_result(refs.into_iter().unique().collect())
}

/// Resolve API references back into a deduplicated identity set.
pub(crate) fn identity_models_for(
    attribute: &str,
    refs: &[IdentityRef],
    scope: &ConversionScope<'_>,
) -> Result<Vec<IdentityModel>, Diagnostics> {
    let mut diags = Diagnostics::new();
    let parsed: Vec<(&IdentityRef, IdentityType)> = refs
        .iter()
        .filter_map(|r| {
            diags
                .capture(attribute, IdentityType::parse(&r.identity_type))
                .map(|t| (r, t))
        })
        .collect();

    let catalog = catalog_for(attribute, parsed.iter().map(|(_, t)| *t), scope, &mut diags);

    let mut models = Vec::new();
    for (identity_ref, identity_type) in parsed {
        let catalog = match (identity_type, catalog) {
            (IdentityType::User, _) => &[][..],
            (_, Some(catalog)) => catalog,
            (_, None) => continue,
        };
        match resolve_identity_name(&identity_ref.id, identity_type, catalog, |id| scope.user(id)) {
            Ok(model) => models.push(model),
            Err(err @ ProviderError::Canceled(_)) => {
                diags.add_error(attribute, err);
                return Err(diags);
            }
            Err(err) => diags.add_error(attribute, err),
        }
    }

    diags.into_result(models.into_iter().unique().collect())
}

fn catalog_for<'s>(
    attribute: &str,
    mut types: impl Iterator<Item = IdentityType>,
    scope: &'s ConversionScope<'_>,
    diags: &mut Diagnostics,
) -> Option<&'s [Identity]> {
    if types.any(|t| t != IdentityType::User) {
        diags.capture(attribute, scope.identities())
    } else {
        Some(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tests::fixtures::{StaticCatalog, context_attribute, group, user};

    fn lookup_ok(name: &str) -> Result<User, ProviderError> {
        Ok(user("u-1", name))
    }

    fn lookup_missing(name: &str) -> Result<User, ProviderError> {
        Err(ProviderError::IdentityNotFound {
            name: name.to_string(),
            identity_type: "user".into(),
        })
    }

    #[test]
    fn test_user_uses_single_lookup() {
        let ids =
            resolve_identity_ids("a@x.com", IdentityType::User, &[], lookup_ok).unwrap();
        assert_eq!(ids, vec!["u-1"]);
    }

    #[test]
    fn test_user_lookup_failure_is_not_found() {
        let err =
            resolve_identity_ids("a@x.com", IdentityType::User, &[], lookup_missing).unwrap_err();
        assert_eq!(
            err,
            ProviderError::IdentityNotFound {
                name: "a@x.com".into(),
                identity_type: "user".into()
            }
        );
    }

    #[test]
    fn test_user_lookup_cancellation_propagates() {
        let err = resolve_identity_ids("a@x.com", IdentityType::User, &[], |_| {
            Err(ProviderError::Canceled("deadline".into()))
        })
        .unwrap_err();
        assert!(matches!(err, ProviderError::Canceled(_)));
    }

    #[test]
    fn test_group_returns_all_matches() {
        let catalog = vec![
            group("g1", "Engineering"),
            context_attribute("c1", "Engineering"),
            group("g2", "Engineering"),
            group("g3", "Support"),
        ];
        let ids =
            resolve_identity_ids("Engineering", IdentityType::Group, &catalog, lookup_missing)
                .unwrap();
        assert_eq!(ids, vec!["g1", "g2"]);
    }

    #[test]
    fn test_type_match_is_case_insensitive() {
        let mut entry = group("g1", "Engineering");
        entry.identity_type = "Group".into();
        let ids = resolve_identity_ids("Engineering", IdentityType::Group, &[entry], lookup_missing)
            .unwrap();
        assert_eq!(ids, vec!["g1"]);
    }

    #[test]
    fn test_group_name_match_is_exact() {
        let catalog = vec![group("g1", "engineering")];
        let err = resolve_identity_ids("Engineering", IdentityType::Group, &catalog, lookup_missing)
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_name_from_id() {
        let catalog = vec![group("g1", "Engineering")];
        assert_eq!(
            resolve_identity_name("g1", IdentityType::Group, &catalog, lookup_missing).unwrap(),
            IdentityModel::new("Engineering", IdentityType::Group)
        );
        assert_eq!(
            resolve_identity_name("u-1", IdentityType::User, &[], |_| Ok(user("u-1", "a@x.com")))
                .unwrap(),
            IdentityModel::new("a@x.com", IdentityType::User)
        );
        assert!(matches!(
            resolve_identity_name("gone", IdentityType::Group, &catalog, lookup_missing),
            Err(ProviderError::IdentityIdNotFound { .. })
        ));
    }

    #[test]
    fn test_refs_dedup_and_skip_catalog_for_users() {
        let catalog = StaticCatalog::default().with_user(user("u-1", "a@x.com"));
        let scope = ConversionScope::new(&catalog);
        let identities = vec![
            IdentityModel::new("a@x.com", IdentityType::User),
            IdentityModel::new("a@x.com", IdentityType::User),
        ];

        let refs = identity_refs_for("grantees", &identities, &scope).unwrap();

        assert_eq!(
            refs,
            vec![IdentityRef {
                id: "u-1".into(),
                identity_type: "USER".into()
            }]
        );
        assert_eq!(catalog.identity_fetches(), 0);
    }

    #[test]
    fn test_refs_report_every_failure() {
        let catalog = StaticCatalog::default().with_identities(vec![group("g1", "Test Group 1")]);
        let scope = ConversionScope::new(&catalog);
        let identities = vec![
            IdentityModel::new("Missing", IdentityType::Group),
            IdentityModel {
                name: "svc".into(),
                identity_type: "service_account".into(),
            },
            IdentityModel::new("nobody@x.com", IdentityType::User),
        ];

        let diags = identity_refs_for("grantees", &identities, &scope).unwrap_err();

        assert_eq!(diags.errors().count(), 3);
        assert!(diags.iter().all(|d| d.attribute.as_deref() == Some("grantees")));
        assert_eq!(catalog.identity_fetches(), 1);
    }

    #[test]
    fn test_models_dedup_by_name_and_type() {
        let catalog = StaticCatalog::default()
            .with_user(user("u-1", "a@x.com"))
            .with_user(user("u-2", "a@x.com"));
        let scope = ConversionScope::new(&catalog);
        let refs = vec![
            IdentityRef {
                id: "u-1".into(),
                identity_type: "USER".into(),
            },
            IdentityRef {
                id: "u-2".into(),
                identity_type: "USER".into(),
            },
        ];

        let models = identity_models_for("grantees", &refs, &scope).unwrap();

        assert_eq!(models, vec![IdentityModel::new("a@x.com", IdentityType::User)]);
        assert_eq!(catalog.identity_fetches(), 0);
    }
}
