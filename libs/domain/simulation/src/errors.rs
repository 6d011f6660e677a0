// [libs/domain/simulation/src/errors.rs]
// =================================================================
// APARATO: SIMULATION ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DEL PIPELINE MONTE CARLO
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use arbol_core_sampling::shape::ShapeError;
use arbol_domain_pdag::PdagError;
use thiserror::Error;

/// Fallos fatales durante la construcción o ejecución del pipeline.
///
/// Ninguno se reintenta: una construcción inconsistente aborta el
/// pipeline completo antes de tocar el dispositivo.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Inconsistencia del modelo PDAG subyacente.
    #[error("Fallo de consistencia del modelo: {0}")]
    Model(#[from] PdagError),

    /// Geometría de muestreo degenerada.
    #[error("Fallo de geometría de muestreo: {0}")]
    Shape(#[from] ShapeError),

    /// Una compuerta referencia un evento básico sin kernel registrado.
    #[error("Unknown BasicEvent {argument_index} in gate {gate_index}")]
    UnknownBasicEvent {
        gate_index: i32,
        argument_index: i32,
    },

    /// Una compuerta referencia una compuerta sin kernel registrado.
    #[error("Unknown Gate {argument_index} in gate {gate_index}")]
    UnknownGate {
        gate_index: i32,
        argument_index: i32,
    },

    /// Se intentó construir un tally para un nodo sin unidad asociada.
    #[error("Attempting to build tally for unknown event {0}")]
    UnknownTallyTarget(i32),

    /// El K-de-N excede el ancho del contador por posición de bit.
    #[error("La compuerta at-least {gate_index} excede el contador u16: {num_inputs} entradas")]
    AtleastCounterOverflow { gate_index: i32, num_inputs: usize },

    /// El pool de hilos del dispositivo no pudo levantarse.
    #[error("Fallo de recursos del dispositivo: {0}")]
    DevicePool(#[from] rayon::ThreadPoolBuildError),
}
