// [libs/domain/simulation/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SIMULATION DOMAIN HUB (V14.0 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PIPELINE MONTE CARLO BIT-PARALELO SOBRE PDAG
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. WAVE DISCIPLINE: El planificador de olas particiona el grafo en
 *    frentes de ejecución donde toda entrada proviene de una ola
 *    estrictamente anterior.
 * 2. SPLIT-BORROW EXECUTION: La arena de buffers se reparte en
 *    (anteriores de solo lectura, salidas exclusivas) por construcción
 *    del orden de olas; el préstamo seguro de Rust certifica en compile
 *    time la invariante de dependencia del dispositivo.
 * 3. ITERABLE QUEUEING: Los kernels de muestreo y tally capturan por
 *    valor un contador de iteración monótono; las compuertas son
 *    single-shot.
 * =================================================================
 */

pub mod buffers;
pub mod errors;
pub mod kernels;
pub mod layer_planner;
pub mod queue;
pub mod records;
pub mod stats;

/// Reexportaciones canónicas para los estratos superiores.
pub mod prelude {
    pub use crate::errors::SimulationError;
    pub use crate::layer_planner::{plan_waves, Wave};
    pub use crate::queue::manager::{MonteCarloPipeline, PipelineSettings};
    pub use crate::records::TallySnapshot;
    pub use crate::stats::{Z_SCORE_95, Z_SCORE_99};
}
