//! The per-frame driver tying the field, grid, extractor and controller together.

use crate::{
    buffer::Buffer2d,
    field::Bumps,
    grid::{Dimensions, GridModel, Limits},
    isoline::{Extraction, IsolineExtractor, LevelRange, LevelSet},
    render::Renderer,
    resolution::ResolutionController,
};
use vek::Vec2;

/// Everything needed to build a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub limits: Limits,
    /// Starting resolution. Clamped to `limits`.
    pub initial: Dimensions,
    /// Starting isoline count. Clamped to `limits.max_isolines`.
    pub isolines: usize,
    pub levels: LevelRange,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            limits: Limits::DEFAULT,
            initial: Dimensions::new(25, 25),
            isolines: 10,
            levels: LevelRange::DEFAULT,
        }
    }
}

/// A user request that changes the scene.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    IncreaseDetail,
    DecreaseDetail,
    IncreaseIsolines,
    DecreaseIsolines,
}

/// Owns all per-frame state. Call [`Scene::tick`] once per frame, then read the buffers or [`Scene::render`].
#[derive(Clone, Debug)]
pub struct Scene {
    field: Bumps,
    grid: GridModel,
    extractor: IsolineExtractor,
    controller: ResolutionController,
    levels: LevelRange,
    time: f32,
    last: Extraction,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let controller = ResolutionController::new(config.limits, config.initial, config.isolines);
        let max = config.limits.max_dimensions();
        Self {
            field: Bumps::default(),
            grid: GridModel::new(config.limits, controller.dimensions()),
            extractor: IsolineExtractor::with_capacity(max, config.limits.max_isolines),
            controller,
            levels: config.levels,
            time: 0.0,
            last: Extraction::default(),
        }
    }

    /// Apply a command. Returns `true` if it changed anything.
    ///
    /// A resolution change rebuilds the grid geometry straight away; values and isolines catch up on the next tick.
    pub fn apply(&mut self, command: Command) -> bool {
        let changed = match command {
            Command::IncreaseDetail => self.controller.increase_detail(),
            Command::DecreaseDetail => self.controller.decrease_detail(),
            Command::IncreaseIsolines => self.controller.increase_isoline_count(),
            Command::DecreaseIsolines => self.controller.decrease_isoline_count(),
        };
        if changed && matches!(command, Command::IncreaseDetail | Command::DecreaseDetail) {
            self.grid.resize(self.controller.dimensions());
        }
        changed
    }

    /// Advance time by `dt` seconds, resample the field and re-extract isolines.
    pub fn tick(&mut self, dt: f32) -> Extraction {
        self.time += dt;
        self.grid.update_values(&self.field, self.time);
        let levels = self.level_set();
        self.last = self
            .extractor
            .extract(self.grid.values(), self.grid.dimensions(), &levels);
        self.last
    }

    /// Draw the current state into `frame`.
    pub fn render(&self, renderer: &Renderer, frame: &mut Buffer2d<u32>) {
        renderer.draw(&self.grid, &self.extractor, frame);
    }

    /// The levels the next tick will extract.
    pub fn level_set(&self) -> LevelSet {
        LevelSet::new(self.levels, self.controller.isoline_count())
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    pub fn isoline_count(&self) -> usize {
        self.controller.isoline_count()
    }

    /// Counts from the most recent tick.
    pub fn last_extraction(&self) -> Extraction {
        self.last
    }

    pub fn field(&self) -> &Bumps {
        &self.field
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn isolines(&self) -> &IsolineExtractor {
        &self.extractor
    }

    pub fn vertices(&self) -> &[Vec2<f32>] {
        self.grid.vertices()
    }

    pub fn values(&self) -> &[f32] {
        self.grid.values()
    }

    pub fn triangle_indices(&self) -> &[u32] {
        self.grid.triangle_indices()
    }

    pub fn isoline_points(&self) -> &[Vec2<f32>] {
        self.extractor.points()
    }

    pub fn isoline_indices(&self) -> &[u32] {
        self.extractor.indices()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
