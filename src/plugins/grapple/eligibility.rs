//! Terrain hook-ability lookup.
//!
//! A terrain entity carries one `SurfaceEligibility`: the occupied cells of its tile grid
//! and a catalog mapping each tile kind to its `TileData`. Empty cells are always
//! hookable; only registered kinds can opt out.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

/// Identifier of a tile kind (stone, metal, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKind(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileData {
    pub can_hook: bool,
}

impl Default for TileData {
    fn default() -> Self {
        Self { can_hook: true }
    }
}

/// Authoring pair consumed by `TileCatalog::rebuild`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDataItem {
    pub kind: TileKind,
    pub data: TileData,
}

/// Kind → data mapping, materialized once from an authoring list.
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    authoring: Vec<TileDataItem>,
    data: HashMap<TileKind, TileData>,
}

impl TileCatalog {
    pub fn authored(items: impl IntoIterator<Item = TileDataItem>) -> Self {
        Self {
            authoring: items.into_iter().collect(),
            data: HashMap::default(),
        }
    }

    /// Replace the mapping with the authoring list, consuming the list.
    ///
    /// A second call without new authoring leaves the catalog empty.
    pub fn rebuild(&mut self) {
        self.data = self.authoring.drain(..).map(|item| (item.kind, item.data)).collect();
    }

    pub fn author(&mut self, item: TileDataItem) {
        self.authoring.push(item);
    }

    #[inline]
    pub fn pending_authoring(&self) -> usize {
        self.authoring.len()
    }

    #[inline]
    pub fn get(&self, kind: TileKind) -> Option<TileData> {
        self.data.get(&kind).copied()
    }
}

#[derive(Component, Debug, Clone)]
pub struct SurfaceEligibility {
    cell_size: Vec2,
    cells: HashMap<IVec2, TileKind>,
    catalog: TileCatalog,
}

impl SurfaceEligibility {
    pub fn new(cell_size: Vec2, catalog: TileCatalog) -> Self {
        Self {
            cell_size,
            cells: HashMap::default(),
            catalog,
        }
    }

    pub fn with_tile(mut self, cell: IVec2, kind: TileKind) -> Self {
        self.cells.insert(cell, kind);
        self
    }

    pub fn set_tile(&mut self, cell: IVec2, kind: TileKind) {
        self.cells.insert(cell, kind);
    }

    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut TileCatalog {
        &mut self.catalog
    }

    /// Cell containing a world position (floor division on each axis).
    #[inline]
    pub fn cell_at(&self, world: Vec2) -> IVec2 {
        (world / self.cell_size).floor().as_ivec2()
    }

    #[inline]
    pub fn tile_at(&self, world: Vec2) -> Option<TileKind> {
        self.cells.get(&self.cell_at(world)).copied()
    }

    /// Data for the cell containing `world`. Empty cells and unregistered kinds are hookable.
    pub fn tile_data_at(&self, world: Vec2) -> TileData {
        self.tile_at(world)
            .and_then(|kind| self.catalog.get(kind))
            .unwrap_or_default()
    }

    #[inline]
    pub fn can_hook_at(&self, world: Vec2) -> bool {
        self.tile_data_at(world).can_hook
    }
}

/// Materialize the catalog of every newly added terrain.
pub fn materialize_tile_catalogs(mut q: Query<&mut SurfaceEligibility, Added<SurfaceEligibility>>) {
    for mut surface in &mut q {
        let authored = surface.catalog().pending_authoring();
        surface.catalog_mut().rebuild();
        debug!("tile catalog materialized from {authored} authored entries");
    }
}
