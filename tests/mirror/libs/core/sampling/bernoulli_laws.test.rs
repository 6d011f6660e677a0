// [tests/mirror/libs/core/sampling/bernoulli_laws.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE LEYES BERNOULLI (V6.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-SAMPLING
 * RESPONSABILIDAD: LEYES DE FRONTERA Y EMPAQUETADO DE MUESTRAS
 *
 * # Mathematical Proof (Boundary Laws):
 * p=0 produce words apagados bit-exactos y p=1 words saturados, pues
 * la proyección uniforme u = w * 2^-32 satisface 0 <= u < 1 para todo
 * word w de 32 bits. popcount(saturado) = W y popcount(apagado) = 0.
 * =================================================================
 */

use arbol_core_sampling::bernoulli::{generate_bitpack, SamplerArgs};
use proptest::prelude::*;

fn sample_point(node_index: u32, bitpack_idx: u32, iteration: u32) -> SamplerArgs {
    SamplerArgs {
        node_index,
        event_slot: 0,
        batch_id: 0,
        bitpack_idx,
        iteration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ley_de_frontera_p_cero() {
        println!("🔬 [BERNOULLI]: Ley p=0 sobre u8 y u64...");
        for bitpack_idx in 0..64 {
            let args = sample_point(11, bitpack_idx, 1);
            assert_eq!(generate_bitpack::<u8>(&args, 0.0), 0u8);
            assert_eq!(generate_bitpack::<u64>(&args, 0.0), 0u64);
        }
    }

    #[test]
    fn ley_de_frontera_p_uno() {
        println!("🔬 [BERNOULLI]: Ley p=1 sobre u8 y u64...");
        for bitpack_idx in 0..64 {
            let args = sample_point(11, bitpack_idx, 1);
            assert_eq!(generate_bitpack::<u8>(&args, 1.0), 0xFF);
            assert_eq!(generate_bitpack::<u64>(&args, 1.0), u64::MAX);
            assert_eq!(generate_bitpack::<u64>(&args, 1.0).count_ones(), 64);
        }
    }

    #[test]
    fn reproducibilidad_bit_perfecta_entre_ejecuciones() {
        let args = sample_point(23, 907, 5);
        let first_run = generate_bitpack::<u64>(&args, 0.42);
        let second_run = generate_bitpack::<u64>(&args, 0.42);
        assert_eq!(first_run, second_run);
    }

    #[test]
    fn la_media_empirica_converge_a_p() {
        let probability = 0.125;
        let total_words = 8192u32;
        let mut total_ones = 0u64;

        for bitpack_idx in 0..total_words {
            let args = sample_point(5, bitpack_idx, 1);
            total_ones += generate_bitpack::<u64>(&args, probability).count_ones() as u64;
        }

        let total_bits = total_words as f64 * 64.0;
        let empirical_mean = total_ones as f64 / total_bits;
        let standard_error = (probability * (1.0 - probability) / total_bits).sqrt();

        println!(
            "      📈 [CONVERGENCE]: mean={empirical_mean:.5} target={probability} sigma={standard_error:.5}"
        );
        // Margen de 5 sigmas sobre 524288 bits muestreados.
        assert!((empirical_mean - probability).abs() < 5.0 * standard_error);
    }

    proptest! {
        /// El popcount jamás excede W y es determinista para todo p.
        #[test]
        fn el_empaquetado_es_determinista_y_acotado(
            probability in 0.0f64..=1.0,
            node_index in 1u32..10_000,
            bitpack_idx in 0u32..100_000,
            iteration in 1u32..1_000,
        ) {
            let args = sample_point(node_index, bitpack_idx, iteration);

            let first = generate_bitpack::<u64>(&args, probability);
            let second = generate_bitpack::<u64>(&args, probability);
            prop_assert_eq!(first, second);
            prop_assert!(first.count_ones() <= 64);

            let narrow = generate_bitpack::<u8>(&args, probability);
            prop_assert!(narrow.count_ones() <= 8);
        }
    }
}
