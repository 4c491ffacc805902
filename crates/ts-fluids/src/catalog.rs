//! Fluid catalog: identifiers, aliases and the backing rfluids substance.
//!
//! Canonical ids follow REFPROP fluid-file names (`nitrogen`, `isobutan`,
//! `r134a`); common chemical names and refrigerant numbers are aliases.

use rfluids::prelude::{PredefinedMix, Pure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluidKind {
    Pure,
    PredefinedMixture,
}

/// Substance that CoolProp evaluates for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substance {
    Pure(Pure),
    Mixture(PredefinedMix),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidCatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub substance: Substance,
}

impl Substance {
    pub fn kind(&self) -> FluidKind {
        match self {
            Substance::Pure(_) => FluidKind::Pure,
            Substance::Mixture(_) => FluidKind::PredefinedMixture,
        }
    }
}

impl FluidCatalogEntry {
    pub fn kind(&self) -> FluidKind {
        self.substance.kind()
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    /// Exact, case-insensitive match on the canonical id or an alias.
    pub fn is_named(&self, name: &str) -> bool {
        self.canonical_id.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

const CATALOG: [FluidCatalogEntry; 32] = [
    FluidCatalogEntry {
        canonical_id: "nitrogen",
        display_name: "Nitrogen",
        aliases: &["N2"],
        substance: Substance::Pure(Pure::Nitrogen),
    },
    FluidCatalogEntry {
        canonical_id: "oxygen",
        display_name: "Oxygen",
        aliases: &["O2"],
        substance: Substance::Pure(Pure::Oxygen),
    },
    FluidCatalogEntry {
        canonical_id: "argon",
        display_name: "Argon",
        aliases: &["Ar"],
        substance: Substance::Pure(Pure::Argon),
    },
    FluidCatalogEntry {
        canonical_id: "helium",
        display_name: "Helium",
        aliases: &["He"],
        substance: Substance::Pure(Pure::Helium),
    },
    FluidCatalogEntry {
        canonical_id: "hydrogen",
        display_name: "Hydrogen",
        aliases: &["H2"],
        substance: Substance::Pure(Pure::Hydrogen),
    },
    FluidCatalogEntry {
        canonical_id: "neon",
        display_name: "Neon",
        aliases: &["Ne"],
        substance: Substance::Pure(Pure::Neon),
    },
    FluidCatalogEntry {
        canonical_id: "krypton",
        display_name: "Krypton",
        aliases: &["Kr"],
        substance: Substance::Pure(Pure::Krypton),
    },
    FluidCatalogEntry {
        canonical_id: "xenon",
        display_name: "Xenon",
        aliases: &["Xe"],
        substance: Substance::Pure(Pure::Xenon),
    },
    FluidCatalogEntry {
        canonical_id: "air",
        display_name: "Air (pseudo-pure)",
        aliases: &["atmosphere"],
        substance: Substance::Pure(Pure::Air),
    },
    FluidCatalogEntry {
        canonical_id: "water",
        display_name: "Water",
        aliases: &["H2O", "R718"],
        substance: Substance::Pure(Pure::Water),
    },
    FluidCatalogEntry {
        canonical_id: "co2",
        display_name: "Carbon Dioxide",
        aliases: &["carbon dioxide", "R744"],
        substance: Substance::Pure(Pure::CarbonDioxide),
    },
    FluidCatalogEntry {
        canonical_id: "co",
        display_name: "Carbon Monoxide",
        aliases: &["carbon monoxide"],
        substance: Substance::Pure(Pure::CarbonMonoxide),
    },
    FluidCatalogEntry {
        canonical_id: "methane",
        display_name: "Methane",
        aliases: &["CH4", "R50"],
        substance: Substance::Pure(Pure::Methane),
    },
    FluidCatalogEntry {
        canonical_id: "ethane",
        display_name: "Ethane",
        aliases: &["C2H6", "R170"],
        substance: Substance::Pure(Pure::Ethane),
    },
    FluidCatalogEntry {
        canonical_id: "ethylene",
        display_name: "Ethylene",
        aliases: &["C2H4", "R1150"],
        substance: Substance::Pure(Pure::Ethylene),
    },
    FluidCatalogEntry {
        canonical_id: "propane",
        display_name: "Propane",
        aliases: &["C3H8", "n-propane", "R290"],
        substance: Substance::Pure(Pure::nPropane),
    },
    FluidCatalogEntry {
        canonical_id: "propylen",
        display_name: "Propylene",
        aliases: &["propylene", "C3H6", "R1270"],
        substance: Substance::Pure(Pure::Propylene),
    },
    FluidCatalogEntry {
        canonical_id: "butane",
        display_name: "n-Butane",
        aliases: &["n-butane", "R600"],
        substance: Substance::Pure(Pure::nButane),
    },
    FluidCatalogEntry {
        canonical_id: "isobutan",
        display_name: "Isobutane",
        aliases: &["isobutane", "R600a"],
        substance: Substance::Pure(Pure::Isobutane),
    },
    FluidCatalogEntry {
        canonical_id: "pentane",
        display_name: "n-Pentane",
        aliases: &["n-pentane", "R601"],
        substance: Substance::Pure(Pure::nPentane),
    },
    FluidCatalogEntry {
        canonical_id: "ipentane",
        display_name: "Isopentane",
        aliases: &["isopentane", "R601a"],
        substance: Substance::Pure(Pure::Isopentane),
    },
    FluidCatalogEntry {
        canonical_id: "hexane",
        display_name: "n-Hexane",
        aliases: &["n-hexane"],
        substance: Substance::Pure(Pure::nHexane),
    },
    FluidCatalogEntry {
        canonical_id: "ammonia",
        display_name: "Ammonia",
        aliases: &["NH3", "R717"],
        substance: Substance::Pure(Pure::Ammonia),
    },
    FluidCatalogEntry {
        canonical_id: "n2o",
        display_name: "Nitrous Oxide",
        aliases: &["nitrous oxide", "R744A"],
        substance: Substance::Pure(Pure::NitrousOxide),
    },
    FluidCatalogEntry {
        canonical_id: "so2",
        display_name: "Sulfur Dioxide",
        aliases: &["sulfur dioxide", "R764"],
        substance: Substance::Pure(Pure::SulfurDioxide),
    },
    FluidCatalogEntry {
        canonical_id: "r32",
        display_name: "R32",
        aliases: &["difluoromethane"],
        substance: Substance::Pure(Pure::R32),
    },
    FluidCatalogEntry {
        canonical_id: "r125",
        display_name: "R125",
        aliases: &["pentafluoroethane"],
        substance: Substance::Pure(Pure::R125),
    },
    FluidCatalogEntry {
        canonical_id: "r134a",
        display_name: "R134a",
        aliases: &["tetrafluoroethane"],
        substance: Substance::Pure(Pure::R134a),
    },
    FluidCatalogEntry {
        canonical_id: "r152a",
        display_name: "R152a",
        aliases: &["difluoroethane"],
        substance: Substance::Pure(Pure::R152a),
    },
    FluidCatalogEntry {
        canonical_id: "r245fa",
        display_name: "R245fa",
        aliases: &[],
        substance: Substance::Pure(Pure::R245fa),
    },
    FluidCatalogEntry {
        canonical_id: "r1234yf",
        display_name: "R1234yf",
        aliases: &[],
        substance: Substance::Pure(Pure::R1234yf),
    },
    FluidCatalogEntry {
        canonical_id: "r410a",
        display_name: "R410A",
        aliases: &["R-410A"],
        substance: Substance::Mixture(PredefinedMix::R410A),
    },
];

/// Fluid-file suffixes accepted (and ignored) on identifiers.
const FILE_SUFFIXES: [&str; 3] = [".fld", ".ppf", ".mix"];

pub fn fluid_catalog() -> &'static [FluidCatalogEntry] {
    &CATALOG
}

pub fn filter_catalog(query: &str) -> Vec<&'static FluidCatalogEntry> {
    fluid_catalog()
        .iter()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Resolve an identifier such as `nitrogen`, `N2`, `R134A` or `R410A.ppf`.
pub fn resolve_fluid(identifier: &str) -> Option<&'static FluidCatalogEntry> {
    let name = strip_file_suffix(identifier.trim());
    if name.is_empty() {
        return None;
    }
    fluid_catalog().iter().find(|entry| entry.is_named(name))
}

fn strip_file_suffix(name: &str) -> &str {
    FILE_SUFFIXES
        .iter()
        .find_map(|suffix| {
            let split = name.len().checked_sub(suffix.len())?;
            let (stem, tail) = (name.get(..split)?, name.get(split..)?);
            tail.eq_ignore_ascii_case(suffix).then_some(stem)
        })
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for entry in fluid_catalog() {
            for name in std::iter::once(&entry.canonical_id).chain(entry.aliases) {
                assert!(
                    seen.insert(name.to_ascii_lowercase()),
                    "duplicate catalog name: {name}"
                );
            }
        }
    }

    #[test]
    fn resolves_refprop_style_names() {
        assert_eq!(resolve_fluid("nitrogen").unwrap().canonical_id, "nitrogen");
        assert_eq!(resolve_fluid("isobutan").unwrap().canonical_id, "isobutan");
        assert_eq!(resolve_fluid("R134A").unwrap().canonical_id, "r134a");
        assert_eq!(resolve_fluid("NITROGEN.FLD").unwrap().canonical_id, "nitrogen");
    }

    #[test]
    fn resolves_aliases() {
        assert_eq!(resolve_fluid("N2").unwrap().canonical_id, "nitrogen");
        assert_eq!(resolve_fluid("isobutane").unwrap().canonical_id, "isobutan");
        assert_eq!(resolve_fluid(" R600a ").unwrap().canonical_id, "isobutan");
    }

    #[test]
    fn predefined_mixture_is_present() {
        let r410a = resolve_fluid("R410A.ppf").expect("R410A should be in catalog");
        assert_eq!(r410a.kind(), FluidKind::PredefinedMixture);
        assert_eq!(r410a.substance, Substance::Mixture(PredefinedMix::R410A));
    }

    #[test]
    fn kind_follows_substance() {
        assert_eq!(resolve_fluid("nitrogen").unwrap().kind(), FluidKind::Pure);
        let mixtures: Vec<_> = fluid_catalog()
            .iter()
            .filter(|entry| entry.kind() == FluidKind::PredefinedMixture)
            .map(|entry| entry.canonical_id)
            .collect();
        assert_eq!(mixtures, ["r410a"]);
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert!(resolve_fluid("urine").is_none());
        assert!(resolve_fluid("").is_none());
        assert!(resolve_fluid(".fld").is_none());
        // Substring matches are for search only.
        assert!(resolve_fluid("nitro").is_none());
    }

    #[test]
    fn search_finds_nitrous_oxide() {
        let results = filter_catalog("nitrous");
        assert!(results.iter().any(|entry| entry.canonical_id == "n2o"));
        assert_eq!(filter_catalog("").len(), fluid_catalog().len());
    }
}
