// [libs/domain/simulation/src/records.rs]
/*!
 * =================================================================
 * APARATO: EVENT RECORD CONTRACTS (V8.0 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: REGISTROS DE EVENTO RESIDENTES EN EL DISPOSITIVO
 *
 * # Mathematical Proof (Stable Identity):
 * Cada registro porta el índice estable del nodo PDAG que representa
 * más el slot de su buffer en la arena. Las compuertas guardan sus
 * insumos como slots de olas anteriores con el offset de negaciones;
 * la partición [0, offset) positivos / [offset, n) negados es estable
 * entre iteraciones.
 * =================================================================
 */

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::buffers::BufferId;

/// Registro de un evento básico: hoja Bernoulli con buffer propio.
#[derive(Debug, Clone)]
pub struct BasicEventRecord {
    /// Índice estable del nodo en el PDAG.
    pub node_index: i32,
    /// Probabilidad puntual p en [0, 1].
    pub probability: f64,
    /// Slot del buffer de salida en la arena.
    pub buffer: BufferId,
}

/// Registro de una compuerta lógica.
#[derive(Debug, Clone)]
pub struct GateRecord {
    pub node_index: i32,
    /// Insumos en slots de olas anteriores: positivos primero.
    pub inputs: Vec<BufferId>,
    /// Posición donde comienzan los insumos negados.
    pub negated_inputs_offset: usize,
    /// Slot del buffer de salida en la arena.
    pub buffer: BufferId,
}

impl GateRecord {
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }
}

/// Registro de una compuerta K-de-N.
#[derive(Debug, Clone)]
pub struct AtleastGateRecord {
    pub gate: GateRecord,
    /// Umbral k: 0 => siempre uno; n+1 => siempre cero.
    pub min_number: u16,
}

/// Acumulador de tally de un nodo: popcount corrido más estadísticas.
#[derive(Debug)]
pub struct TallyEvent {
    pub node_index: i32,
    /// Buffer contado; alias del buffer de un evento o compuerta.
    pub buffer: BufferId,
    /// Unos acumulados; crece monótonamente entre iteraciones.
    pub num_one_bits: AtomicU64,
    pub mean: f64,
    pub std_err: f64,
    /// [low95, high95, low99, high99].
    pub confidence_intervals: [f64; 4],
}

impl TallyEvent {
    pub fn fresh(node_index: i32, buffer: BufferId) -> Self {
        Self {
            node_index,
            buffer,
            num_one_bits: AtomicU64::new(0),
            mean: 0.0,
            std_err: 0.0,
            confidence_intervals: [0.0; 4],
        }
    }

    /// Instantánea inmutable del estado actual del acumulador.
    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            num_one_bits: self.num_one_bits.load(Ordering::Relaxed),
            mean: self.mean,
            std_err: self.std_err,
            ci_95_low: self.confidence_intervals[0],
            ci_95_high: self.confidence_intervals[1],
            ci_99_low: self.confidence_intervals[2],
            ci_99_high: self.confidence_intervals[3],
        }
    }
}

/// Instantánea serializable del tally de un nodo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TallySnapshot {
    pub num_one_bits: u64,
    pub mean: f64,
    pub std_err: f64,
    pub ci_95_low: f64,
    pub ci_95_high: f64,
    pub ci_99_low: f64,
    pub ci_99_high: f64,
}
