// [libs/domain/pdag/src/connective.rs]
/*!
 * =================================================================
 * APARATO: CONNECTIVE TAXONOMY (V5.1 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CATÁLOGO DE OPERADORES LÓGICOS DE COMPUERTA
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operador lógico de una compuerta del PDAG.
///
/// El orden de los discriminantes es el código estable de conectiva:
/// gobierna la agrupación determinista dentro de cada ola de ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connective {
    And,
    Or,
    /// K-de-N: verdadera si al menos `min_number` entradas lo son.
    Atleast,
    Xor,
    Not,
    Nand,
    Nor,
    /// Paso directo de una única entrada.
    Null,
    /// Definida en el estrato PDAG; sin kernel en la ruta acelerada.
    Iff,
    /// Definida en el estrato PDAG; sin kernel en la ruta acelerada.
    Imply,
    /// Definida en el estrato PDAG; sin kernel en la ruta acelerada.
    Cardinality,
}

impl Connective {
    /// Código estable de ordenación dentro de una ola.
    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Indica si la ruta acelerada dispone de un kernel para esta
    /// conectiva. Las restantes se rechazan en la planificación.
    #[inline]
    pub fn has_kernel(&self) -> bool {
        !matches!(self, Connective::Iff | Connective::Imply | Connective::Cardinality)
    }

    /// Conectivas de aridad exactamente uno.
    #[inline]
    pub fn is_unary(&self) -> bool {
        matches!(self, Connective::Not | Connective::Null)
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Connective::And => "and",
            Connective::Or => "or",
            Connective::Atleast => "atleast",
            Connective::Xor => "xor",
            Connective::Not => "not",
            Connective::Nand => "nand",
            Connective::Nor => "nor",
            Connective::Null => "null",
            Connective::Iff => "iff",
            Connective::Imply => "imply",
            Connective::Cardinality => "cardinality",
        };
        write!(formatter, "{label}")
    }
}
