//! Class name allocation and the run-scoped class registry.
//!
//! Generated class ids have the form `<prefix><8 hex>` where the hex digits are
//! the leading characters of the SHA-1 digest of the canonical declaration.
//! The digest length is part of the stylesheet format: rules written by an
//! earlier run are only recognized (and reused) if they use the same length.

use super::normalize::{CanonicalDeclaration, normalize};
use crate::error::{DestyleError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Number of hex digits kept from the declaration digest.
pub const DIGEST_LEN: usize = 8;

/// Prefix marking a class as generated from an inline style.
pub const DEFAULT_CLASS_PREFIX: &str = "inl-";

/// A generated class identifier, e.g. `inl-1a2b3c4d`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(String);

impl ClassId {
    /// Derive the class id for a declaration. Equal declarations always map
    /// to equal ids.
    pub fn derive(prefix: &str, declaration: &CanonicalDeclaration) -> Self {
        let digest = sha1_smol::Sha1::from(declaration.as_str().as_bytes()).hexdigest();
        ClassId(format!("{}{}", prefix, &digest[..DIGEST_LEN]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of asking the registry for a declaration's class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub id: ClassId,
    /// True when the class did not exist before this call and must be emitted.
    pub fresh: bool,
}

/// Mapping from canonical declaration to class id for one run.
///
/// Seeded from the target stylesheet, then extended as documents are
/// rewritten. Newly allocated pairs are kept in allocation order in
/// [`ClassRegistry::pending`] until the stylesheet is emitted.
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    prefix: String,
    by_declaration: HashMap<CanonicalDeclaration, ClassId>,
    by_id: HashMap<ClassId, CanonicalDeclaration>,
    pending: Vec<(CanonicalDeclaration, ClassId)>,
}

impl ClassRegistry {
    /// Create an empty registry generating ids with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            by_declaration: HashMap::new(),
            by_id: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Build a registry from the rules a previous run appended to `stylesheet`.
    ///
    /// Rules are read in the line shape the emitter writes them in:
    /// one `.<prefix><8 hex> { ... }` per line. The body runs to the last `}`
    /// on the line, so values containing braces survive. Hand-authored rules
    /// are ignored. Rule bodies are normalized again so spacing differences
    /// in older output do not defeat reuse.
    pub fn seed_from_stylesheet(prefix: &str, stylesheet: &str) -> Result<Self> {
        let mut registry = Self::new(prefix);
        let pattern = format!(
            r"(?m)^[ \t]*\.({}[0-9a-f]{{{}}})[ \t]*\{{(.*)\}}[ \t\r]*$",
            regex::escape(prefix),
            DIGEST_LEN
        );
        let rule_re = Regex::new(&pattern).map_err(|e| {
            DestyleError::UserError(format!(
                "invalid class prefix '{}' for stylesheet scan: {}",
                prefix, e
            ))
        })?;

        for caps in rule_re.captures_iter(stylesheet) {
            let id = ClassId(caps[1].to_string());
            let declaration = normalize(&caps[2]);
            if declaration.is_empty() {
                continue;
            }
            registry
                .register_existing(declaration, id)
                .map_err(|e| e.in_source("the existing stylesheet"))?;
        }

        Ok(registry)
    }

    /// Record a pair that already exists in the stylesheet.
    ///
    /// The first registration of a declaration wins. Registering a second,
    /// different declaration under an id already in use is a collision.
    pub fn register_existing(
        &mut self,
        declaration: CanonicalDeclaration,
        id: ClassId,
    ) -> Result<()> {
        self.check_collision(&declaration, &id)?;
        if self.by_declaration.contains_key(&declaration) {
            return Ok(());
        }
        self.by_id.insert(id.clone(), declaration.clone());
        self.by_declaration.insert(declaration, id);
        Ok(())
    }

    /// Return the class for `declaration`, allocating a new one if needed.
    ///
    /// Fails with [`DestyleError::HashCollision`] when the derived id is
    /// already bound to a different declaration.
    pub fn allocate(&mut self, declaration: &CanonicalDeclaration) -> Result<Allocation> {
        if let Some(id) = self.by_declaration.get(declaration) {
            return Ok(Allocation {
                id: id.clone(),
                fresh: false,
            });
        }

        let id = ClassId::derive(&self.prefix, declaration);
        self.check_collision(declaration, &id)?;

        self.by_id.insert(id.clone(), declaration.clone());
        self.by_declaration.insert(declaration.clone(), id.clone());
        self.pending.push((declaration.clone(), id.clone()));

        Ok(Allocation { id, fresh: true })
    }

    fn check_collision(&self, declaration: &CanonicalDeclaration, id: &ClassId) -> Result<()> {
        match self.by_id.get(id) {
            Some(existing) if existing != declaration => Err(DestyleError::HashCollision {
                class_id: id.to_string(),
                existing: existing.to_string(),
                incoming: declaration.to_string(),
                source_name: None,
            }),
            _ => Ok(()),
        }
    }

    /// Look up the class already bound to a declaration.
    pub fn lookup(&self, declaration: &CanonicalDeclaration) -> Option<&ClassId> {
        self.by_declaration.get(declaration)
    }

    /// Pairs allocated since the registry was built, in allocation order.
    pub fn pending(&self) -> &[(CanonicalDeclaration, ClassId)] {
        &self.pending
    }

    /// Number of known declarations (seeded and allocated).
    pub fn len(&self) -> usize {
        self.by_declaration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_declaration.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic_and_fixed_length() {
        let decl = normalize("color:red;");
        let a = ClassId::derive("inl-", &decl);
        let b = ClassId::derive("inl-", &normalize("color:red"));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), "inl-".len() + DIGEST_LEN);
        assert!(a.as_str()[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn derive_uses_sha1_prefix() {
        let decl = normalize("color:red");
        let digest = sha1_smol::Sha1::from("color:red;".as_bytes()).hexdigest();
        assert_eq!(
            ClassId::derive("inl-", &decl).as_str(),
            format!("inl-{}", &digest[..8])
        );
    }

    #[test]
    fn different_declarations_get_different_ids() {
        let a = ClassId::derive("inl-", &normalize("color:red"));
        let b = ClassId::derive("inl-", &normalize("color:blue"));
        assert_ne!(a, b);
    }

    #[test]
    fn allocate_reuses_existing_classes() {
        let mut registry = ClassRegistry::new("inl-");
        let decl = normalize("margin:0");

        let first = registry.allocate(&decl).unwrap();
        let second = registry.allocate(&decl).unwrap();

        assert!(first.fresh);
        assert!(!second.fresh);
        assert_eq!(first.id, second.id);
        assert_eq!(registry.pending().len(), 1);
    }

    #[test]
    fn pending_keeps_allocation_order() {
        let mut registry = ClassRegistry::new("inl-");
        for raw in ["b:1", "a:1", "c:1", "a:1"] {
            registry.allocate(&normalize(raw)).unwrap();
        }
        let order: Vec<&str> = registry.pending().iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(order, vec!["b:1;", "a:1;", "c:1;"]);
    }

    #[test]
    fn seeded_rules_are_reused_not_pending() {
        let decl = normalize("color:red");
        let id = ClassId::derive("inl-", &decl);
        let css = format!("body {{ margin: 0 }}\n\n/* generated */\n.{} {{ color:red; }}\n", id);

        let mut registry = ClassRegistry::seed_from_stylesheet("inl-", &css).unwrap();
        assert_eq!(registry.len(), 1);

        let allocation = registry.allocate(&decl).unwrap();
        assert!(!allocation.fresh);
        assert_eq!(allocation.id, id);
        assert!(registry.pending().is_empty());
    }

    #[test]
    fn seed_renormalizes_rule_bodies() {
        let css = ".inl-0badc0de {   color:red;margin:0 }";
        let registry = ClassRegistry::seed_from_stylesheet("inl-", css).unwrap();
        let id = registry.lookup(&normalize("color:red; margin:0;")).unwrap();
        assert_eq!(id.as_str(), "inl-0badc0de");
    }

    #[test]
    fn seed_keeps_braces_inside_values() {
        let decl = normalize("padding-left:${indent}px;");
        let id = ClassId::derive("inl-", &decl);
        let css = format!("/* generated */\n.{} {{ padding-left:${{indent}}px; }}\n", id);

        let mut registry = ClassRegistry::seed_from_stylesheet("inl-", &css).unwrap();

        assert_eq!(registry.lookup(&decl), Some(&id));
        assert!(!registry.allocate(&decl).unwrap().fresh);
    }

    #[test]
    fn seed_reads_crlf_stylesheets() {
        let css = ".inl-0badc0de { color:red; }\r\n.inl-0badc0df { margin:0; }\r\n";
        let registry = ClassRegistry::seed_from_stylesheet("inl-", css).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn seed_ignores_hand_written_and_short_rules() {
        let css = ".card { color:red }\n.inl-abc123 { color:blue }\n.inl-abcdef012 { x:1 }\n";
        let registry = ClassRegistry::seed_from_stylesheet("inl-", css).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn seed_respects_custom_prefix() {
        let css = ".gen-0badc0de { color:red }\n.inl-0badc0de { color:blue }";
        let registry = ClassRegistry::seed_from_stylesheet("gen-", css).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup(&normalize("color:red")).unwrap().as_str(),
            "gen-0badc0de"
        );
    }

    #[test]
    fn seed_rejects_conflicting_rules() {
        let css = ".inl-0badc0de { color:red }\n.inl-0badc0de { color:blue }";
        let err = ClassRegistry::seed_from_stylesheet("inl-", css).unwrap_err();
        assert!(matches!(err, DestyleError::HashCollision { .. }));
        assert!(err.to_string().contains("existing stylesheet"));
    }

    #[test]
    fn seed_accepts_repeated_identical_rules() {
        let css = ".inl-0badc0de { color:red }\n.inl-0badc0de { color:red; }";
        let registry = ClassRegistry::seed_from_stylesheet("inl-", css).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn forged_entry_triggers_collision() {
        let red = normalize("color:red");
        let red_id = ClassId::derive("inl-", &red);

        let mut registry = ClassRegistry::new("inl-");
        registry
            .register_existing(normalize("color:blue"), red_id.clone())
            .unwrap();

        let err = registry.allocate(&red).unwrap_err();
        match err {
            DestyleError::HashCollision {
                class_id,
                existing,
                incoming,
                ..
            } => {
                assert_eq!(class_id, red_id.to_string());
                assert_eq!(existing, "color:blue;");
                assert_eq!(incoming, "color:red;");
            }
            other => panic!("expected collision, got {:?}", other),
        }
        assert!(registry.pending().is_empty());
    }
}
