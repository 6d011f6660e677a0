// [libs/domain/simulation/src/kernels/mod.rs]
/*!
 * =================================================================
 * APARATO: KERNEL STRATA HUB (V5.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN KERNELS (ESTRATO L2)
 * RESPONSABILIDAD: KERNELS 3D (EVENTOS × BATCH × BITPACKS)
 *
 * # Execution Contract:
 * Cada kernel recorre su rango ND por work-groups: el eje de eventos
 * se mapea a chunks exclusivos de la arena, el plano (batch, bitpacks)
 * se tesela con la forma local negociada por el planificador. Cada
 * word de salida (b, j) es escrito por exactamente un work-item y solo
 * depende de insumos en la misma coordenada (b, j).
 * =================================================================
 */

pub mod atleast;
pub mod basic_event;
pub mod gate;
pub mod tally;

pub use atleast::AtleastKernel;
pub use basic_event::BasicEventKernel;
pub use gate::{
    AndFold, BitFold, GateKernel, NandFold, NorFold, NotFold, NullFold, OrFold, XorFold,
};
pub use tally::TallyKernel;
