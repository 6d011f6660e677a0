// [tests/mirror/libs/domain/simulation/tally_reducer.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DEL REDUCTOR DE TALLIES (V7.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-SIMULATION
 * RESPONSABILIDAD: MONOTONÍA, COTAS E INTERVALOS DE CONFIANZA
 *
 * # Mathematical Proof (Accumulator Laws):
 * Tras i iteraciones, 0 <= num_one_bits <= i * batch * bitpacks * W,
 * el acumulador jamás decrece, y los intervalos satisfacen
 * low99 <= low95 <= mean <= high95 <= high99 dentro de [0,1].
 * =================================================================
 */

use arbol_domain_pdag::Pdag;
use arbol_domain_simulation::prelude::{MonteCarloPipeline, PipelineSettings};
use arbol_domain_simulation::stats;

/// Evento único p=0.5: el escenario de referencia del reductor.
fn single_event_model(probability: f64) -> Pdag {
    Pdag::builder()
        .basic_event(1, probability)
        .root(1)
        .build()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escenario_de_un_evento_con_media_centrada() {
        println!("🔬 [TALLY]: Evento único p=0.5, batch=4, bitpacks=16, W=8...");
        let mut pdag = single_event_model(0.5);
        let settings = PipelineSettings {
            batch_size: 4,
            bitpacks_per_batch: 16,
            desired_occupancy: None,
        };
        let mut pipeline = MonteCarloPipeline::<u8>::new(&mut pdag, settings).unwrap();

        let snapshot = pipeline.tally(1, 1);
        let total_bits = pipeline.shape().sampled_bits_per_iteration::<u8>();

        println!(
            "      📈 [SNAPSHOT]: ones={}/{} mean={:.4} sigma={:.4}",
            snapshot.num_one_bits, total_bits, snapshot.mean, snapshot.std_err
        );
        assert_eq!(total_bits, 512);
        assert!(snapshot.mean >= 0.40 && snapshot.mean <= 0.60, "mean={}", snapshot.mean);

        // El intervalo del 95% es algebraicamente mean ± z * sigma,
        // recortado a [0,1].
        let margin_95 = stats::Z_SCORE_95 * snapshot.std_err;
        assert!((snapshot.ci_95_low - (snapshot.mean - margin_95).max(0.0)).abs() < 1e-12);
        assert!((snapshot.ci_95_high - (snapshot.mean + margin_95).min(1.0)).abs() < 1e-12);
    }

    #[test]
    fn el_acumulador_es_monotono_y_acotado() {
        let mut pdag = single_event_model(0.37);
        let settings = PipelineSettings {
            batch_size: 8,
            bitpacks_per_batch: 32,
            desired_occupancy: None,
        };
        let mut pipeline = MonteCarloPipeline::<u64>::new(&mut pdag, settings).unwrap();
        let bits_per_iteration = pipeline.shape().sampled_bits_per_iteration::<u64>();

        let mut previous_ones = 0u64;
        for iteration in 1..=6u64 {
            let snapshot = pipeline.tally(1, 1);
            assert!(
                snapshot.num_one_bits >= previous_ones,
                "el acumulador decreció en la iteración {iteration}"
            );
            assert!(
                snapshot.num_one_bits <= iteration * bits_per_iteration,
                "el acumulador excede la cota superior en la iteración {iteration}"
            );
            previous_ones = snapshot.num_one_bits;
        }
    }

    #[test]
    fn los_intervalos_anidan_y_contienen_a_la_media() {
        let mut pdag = single_event_model(0.2);
        let settings = PipelineSettings {
            batch_size: 4,
            bitpacks_per_batch: 128,
            desired_occupancy: None,
        };
        let mut pipeline = MonteCarloPipeline::<u64>::new(&mut pdag, settings).unwrap();

        let snapshot = pipeline.tally(1, 3);

        assert!(snapshot.ci_99_low <= snapshot.ci_95_low);
        assert!(snapshot.ci_95_low <= snapshot.mean);
        assert!(snapshot.mean <= snapshot.ci_95_high);
        assert!(snapshot.ci_95_high <= snapshot.ci_99_high);
        for bound in [
            snapshot.ci_95_low,
            snapshot.ci_95_high,
            snapshot.ci_99_low,
            snapshot.ci_99_high,
        ] {
            assert!((0.0..=1.0).contains(&bound));
        }
    }

    #[test]
    fn la_media_reconstruye_el_acumulador() {
        let mut pdag = single_event_model(0.65);
        let settings = PipelineSettings {
            batch_size: 2,
            bitpacks_per_batch: 64,
            desired_occupancy: None,
        };
        let mut pipeline = MonteCarloPipeline::<u64>::new(&mut pdag, settings).unwrap();

        let iterations = 4usize;
        let snapshot = pipeline.tally(1, iterations);
        let total_bits = iterations as u64 * pipeline.shape().sampled_bits_per_iteration::<u64>();

        assert_eq!(snapshot.mean, stats::mean(snapshot.num_one_bits, total_bits));
        assert_eq!(
            snapshot.std_err,
            stats::standard_error(snapshot.mean, total_bits)
        );
    }

    #[test]
    fn un_indice_desconocido_retorna_la_instantanea_por_defecto() {
        let mut pdag = single_event_model(0.5);
        let settings = PipelineSettings {
            batch_size: 4,
            bitpacks_per_batch: 16,
            desired_occupancy: None,
        };
        let mut pipeline = MonteCarloPipeline::<u64>::new(&mut pdag, settings).unwrap();

        let snapshot = pipeline.tally(404, 3);
        println!("      🛑 [UNKNOWN]: snapshot por defecto = {snapshot:?}");
        assert_eq!(snapshot.num_one_bits, 0);
        assert_eq!(snapshot.mean, 0.0);
        assert_eq!(snapshot.std_err, 0.0);
        assert_eq!(
            [snapshot.ci_95_low, snapshot.ci_95_high, snapshot.ci_99_low, snapshot.ci_99_high],
            [0.0, 0.0, 0.0, 0.0]
        );
    }
}
