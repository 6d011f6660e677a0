// [libs/core/device/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DEVICE CORE HUB (V6.0 - PRODUCTION MASTER)
 * CLASIFICACIÓN: CORE LIBRARY (ESTRATO L1)
 * RESPONSABILIDAD: CAPACIDADES DE SILICIO Y PLANIFICACIÓN DE RANGOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CAPABILITY DRIVEN: Toda decisión de forma (work-group, ND-range,
 *    geometría de buffers) nace de un DeviceProfile explícito.
 * 2. PURE PLANNING: El planificador es una función pura del perfil;
 *    los perfiles sintéticos GPU quedan plenamente auditables en tests.
 * 3. CLAMP, NEVER FAIL: La negociación de formas siempre converge por
 *    recorte; el único fallo posible es una aserción de programador.
 * =================================================================
 */

pub mod occupancy;
pub mod profile;
pub mod range;
pub mod working_set;

/// Reexportaciones canónicas para los estratos superiores.
pub mod prelude {
    pub use crate::occupancy::desired_occupancy_for;
    pub use crate::profile::{host_profile, DeviceBackend, DeviceClass, DeviceProfile};
    pub use crate::range::{NdRange, Range3};
    pub use crate::working_set::WorkingSet;
}
