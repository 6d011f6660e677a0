// [libs/domain/pdag/src/errors.rs]
// =================================================================
// APARATO: PDAG ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE CONSISTENCIA DEL MODELO
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use crate::connective::Connective;
use thiserror::Error;

/// Fallos de consistencia del modelo PDAG.
///
/// Todos son fatales durante la construcción del pipeline: el grafo
/// nunca llega al dispositivo en un estado inconsistente.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PdagError {
    /// Dos nodos declararon el mismo índice estable.
    #[error("Índice de nodo duplicado: {0}")]
    DuplicateIndex(i32),

    /// Los índices deben ser estrictamente positivos: el signo del
    /// argumento codifica la negación.
    #[error("Índice de nodo no positivo: {0}")]
    NonPositiveIndex(i32),

    /// Una compuerta referencia un índice inexistente.
    #[error("Argumento desconocido {argument_index} en la compuerta {gate_index}")]
    UnknownArgument {
        gate_index: i32,
        argument_index: i32,
    },

    /// La conectiva carece de kernel en la ruta acelerada.
    #[error("Conectiva sin kernel '{connective}' en la compuerta {gate_index}")]
    UnsupportedConnective {
        gate_index: i32,
        connective: Connective,
    },

    /// El grafo contiene un ciclo; no es un DAG válido.
    #[error("Ciclo detectado a través del nodo {0}")]
    CycleDetected(i32),

    /// NOT/NULL exigen exactamente una entrada.
    #[error("Aridad inválida en la compuerta unaria {gate_index}: {num_inputs} entradas")]
    UnaryArity { gate_index: i32, num_inputs: usize },

    /// El umbral K-de-N viola 0 <= k <= n + 1.
    #[error("Umbral at-least inválido en la compuerta {gate_index}: k={min_number}, n={num_inputs}")]
    AtleastThreshold {
        gate_index: i32,
        min_number: u16,
        num_inputs: usize,
    },

    /// La probabilidad de un evento básico escapa de [0, 1].
    #[error("Probabilidad fuera de [0,1] en el evento básico {index}: {value}")]
    InvalidProbability { index: i32, value: f64 },

    /// El índice raíz declarado no existe en el grafo.
    #[error("La raíz declarada {0} no existe en el grafo")]
    MissingRoot(i32),
}
