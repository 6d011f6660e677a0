// [libs/core/sampling/src/bitpack.rs]
/*!
 * =================================================================
 * APARATO: BITPACK STRATA (V7.2 - SILICON ALIGNED)
 * CLASIFICACIÓN: CORE SAMPLING (ESTRATO L1)
 * RESPONSABILIDAD: ABSTRACCIÓN DEL WORD DE MUESTRAS EMPAQUETADAS
 *
 * # Mathematical Proof (Bit Independence):
 * El bit i de un bit-pack representa el valor de verdad de la muestra
 * Bernoulli i de un nodo. Posiciones homólogas a través de buffers
 * distintos pertenecen al mismo índice de muestra, lo que permite
 * plegar compuertas booleanas con operadores bitwise de ancho completo.
 * =================================================================
 */

use std::fmt::Debug;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, Shr};

/// Contrato del word de máquina que transporta muestras empaquetadas.
///
/// Instanciaciones soportadas por el evaluador: `u8` y `u64`. Las
/// variantes `u16`/`u32` quedan selladas por completitud del estrato.
pub trait Bitpack:
    Copy
    + Default
    + Eq
    + Debug
    + Send
    + Sync
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + BitXor<Output = Self>
    + BitXorAssign
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + 'static
{
    /// Ancho W del word en bits.
    const BITS: u32;
    /// Word con todos los bits apagados (identidad de OR/XOR).
    const ZERO: Self;
    /// Word con todos los bits encendidos (identidad de AND).
    const ONES: Self;

    /// Inyecta los 4 bits bajos de un nibble en el word.
    fn from_nibble(nibble: u8) -> Self;

    /// Población de bits encendidos del word.
    fn count_ones(self) -> u32;

    /// Lectura del bit en la posición `position` (0-indexado).
    fn bit_at(self, position: u32) -> bool;
}

macro_rules! seal_bitpack_strata {
    ($($word_type:ty),+) => {
        $(
            impl Bitpack for $word_type {
                const BITS: u32 = <$word_type>::BITS;
                const ZERO: Self = 0;
                const ONES: Self = !0;

                #[inline(always)]
                fn from_nibble(nibble: u8) -> Self {
                    (nibble & 0x0F) as $word_type
                }

                #[inline(always)]
                fn count_ones(self) -> u32 {
                    <$word_type>::count_ones(self)
                }

                #[inline(always)]
                fn bit_at(self, position: u32) -> bool {
                    (self >> position) & 1 == 1
                }
            }
        )+
    };
}

seal_bitpack_strata!(u8, u16, u32, u64);
