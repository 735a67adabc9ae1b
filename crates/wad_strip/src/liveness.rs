//! Reachability of textures, flats and patches.
//!
//! # Algorithm
//!
//! 1. Seed live textures from every sidedef of both containers, plus the sky
//!    textures. Seed live flats from every sector.
//! 2. Materialize the animation cycles of both containers' `ANIMATED` tables
//!    against the combined (base, then overlay) texture and flat lists.
//! 3. Close over aliases until nothing changes:
//!    - a cycle with one live frame makes every frame live,
//!    - a switch with one live side makes both sides live, and every texture
//!      cycle containing either side live as well.
//! 4. A patch is live when any definition of a live texture places it.
//!
//! Textures, flats and patches are separate namespaces; a name live in one
//! says nothing about the others.

use wad_io::Wad;

use crate::catalog::{AnimationGroup, AnimationKind, Catalog, SwitchPair};
use crate::error::Result;
use crate::geometry::{sector_flats, sidedef_textures};
use crate::names::NameSet;
use crate::options::StripOptions;

/// A container together with its decoded catalog.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    pub wad: &'a Wad,
    pub catalog: &'a Catalog,
}

impl<'a> Source<'a> {
    pub fn new(wad: &'a Wad, catalog: &'a Catalog) -> Self {
        Self { wad, catalog }
    }
}

/// Live resource names, one set per namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedSet {
    pub textures: NameSet,
    pub flats: NameSet,
    pub patches: NameSet,
}

/// Names referenced by geometry that neither container defines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unresolved {
    pub textures: NameSet,
    pub flats: NameSet,
}

impl Unresolved {
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty() && self.flats.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub used: UsedSet,
    /// Every patch and flat name known to either container. Overlay lumps
    /// with these names are candidates for removal.
    pub prunable: NameSet,
    pub unresolved: Unresolved,
}

pub fn analyze(
    base: Source<'_>,
    overlay: Source<'_>,
    options: &StripOptions,
) -> Result<Analysis> {
    let sources = [base, overlay];

    let mut textures = NameSet::new();
    let mut flats = NameSet::new();
    for source in &sources {
        textures.extend(&sidedef_textures(source.wad)?);
        flats.extend(&sector_flats(source.wad)?);
    }

    let unresolved = find_unresolved(&sources, &textures, &flats, options);

    textures.extend(options.sky_textures.iter().map(String::as_str));

    let all_textures = sources
        .iter()
        .flat_map(|source| source.catalog.texture_names())
        .collect::<Vec<_>>();
    let all_flats = sources
        .iter()
        .flat_map(|source| source.catalog.flats().iter().map(String::as_str))
        .collect::<Vec<_>>();

    let mut texture_groups = Vec::new();
    let mut flat_groups = Vec::new();
    for source in &sources {
        for def in source.catalog.animations() {
            match def.kind {
                AnimationKind::Texture => {
                    texture_groups.push(def.materialize(all_textures.as_slice())?)
                }
                AnimationKind::Flat => flat_groups.push(def.materialize(all_flats.as_slice())?),
            }
        }
    }

    let switches = sources
        .iter()
        .flat_map(|source| source.catalog.switches())
        .collect::<Vec<_>>();

    tracing::debug!(
        "Seeded textures={} flats={}; texture_groups={} flat_groups={} switches={}",
        textures.len(),
        flats.len(),
        texture_groups.len(),
        flat_groups.len(),
        switches.len()
    );

    loop {
        let animated = mark_groups(&mut textures, &texture_groups);
        let switched = mark_switches(&mut textures, &switches, &texture_groups);
        if !animated && !switched {
            break;
        }
    }
    mark_groups(&mut flats, &flat_groups);

    let mut patches = NameSet::new();
    for source in &sources {
        for texture in source.catalog.textures() {
            if textures.contains(&texture.name) {
                patches.extend(texture.patches.iter().map(|p| p.patch.as_str()));
            }
        }
    }

    let mut prunable = NameSet::new();
    for source in &sources {
        prunable.extend(source.catalog.patch_names().iter().map(String::as_str));
        prunable.extend(source.catalog.flats().iter().map(String::as_str));
    }

    tracing::info!(
        "Live textures={} flats={} patches={}",
        textures.len(),
        flats.len(),
        patches.len()
    );

    Ok(Analysis {
        used: UsedSet {
            textures,
            flats,
            patches,
        },
        prunable,
        unresolved,
    })
}

/// Apply animation aliasing until no group adds a name. Returns whether
/// anything was added.
fn mark_groups(live: &mut NameSet, groups: &[AnimationGroup]) -> bool {
    let mut changed = false;
    loop {
        let mut added = false;
        for group in groups {
            if group.members.iter().any(|member| live.contains(member)) {
                for member in &group.members {
                    added |= live.insert(member);
                }
            }
        }
        if !added {
            return changed;
        }
        changed = true;
    }
}

/// Make both sides of every half-live switch live, along with every texture
/// cycle that contains either side.
fn mark_switches(
    live: &mut NameSet,
    switches: &[&SwitchPair],
    groups: &[AnimationGroup],
) -> bool {
    let mut changed = false;
    for switch in switches {
        if !live.contains(&switch.off) && !live.contains(&switch.on) {
            continue;
        }

        changed |= live.insert(&switch.off);
        changed |= live.insert(&switch.on);

        for group in groups {
            if group.contains(&switch.off) || group.contains(&switch.on) {
                for member in &group.members {
                    changed |= live.insert(member);
                }
            }
        }
    }
    changed
}

fn find_unresolved(
    sources: &[Source<'_>],
    textures: &NameSet,
    flats: &NameSet,
    options: &StripOptions,
) -> Unresolved {
    let known_textures = sources
        .iter()
        .flat_map(|source| source.catalog.texture_names())
        .collect::<NameSet>();
    let known_flats = sources
        .iter()
        .flat_map(|source| source.catalog.flats().iter().map(String::as_str))
        .collect::<NameSet>();

    let mut unresolved = Unresolved::default();
    for name in textures {
        if !known_textures.contains(name) && !options.sky_textures.iter().any(|sky| sky == name) {
            tracing::warn!("Texture '{}' is used by a map but defined nowhere", name);
            unresolved.textures.insert(name);
        }
    }
    for name in flats {
        if !known_flats.contains(name) {
            tracing::warn!("Flat '{}' is used by a map but defined nowhere", name);
            unresolved.flats.insert(name);
        }
    }
    unresolved
}
