// [libs/domain/pdag/src/node.rs]
/*!
 * =================================================================
 * APARATO: PDAG NODE CONTRACTS (V11.2 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: NODOS, EVENTOS BÁSICOS Y CONSTRUCTOR VALIDANTE
 *
 * # Mathematical Proof (Signed Arguments):
 * Un argumento con índice negativo -i referencia al nodo i negado.
 * La partición positivos/negados de cada compuerta es estable entre
 * iteraciones, condición necesaria para la reproducibilidad bit-perfecta
 * del pipeline de muestreo.
 * =================================================================
 */

use std::collections::BTreeMap;

use crate::connective::Connective;
use crate::errors::PdagError;

/// Expresión de probabilidad de un evento básico.
///
/// El cargador MEF completo queda fuera de este estrato; la variante
/// constante cubre los modelos ya resueltos numéricamente.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expression {
    Constant(f64),
}

impl Expression {
    /// Valor numérico de la expresión.
    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            Expression::Constant(value) => *value,
        }
    }
}

/// Variable hoja del grafo: una Bernoulli independiente.
#[derive(Debug, Clone)]
pub struct Variable {
    pub index: i32,
    pub(crate) order: u32,
}

/// Compuerta interna del grafo.
#[derive(Debug, Clone)]
pub struct Gate {
    pub index: i32,
    pub connective: Connective,
    /// Argumentos con signo: negativo denota negación del hijo.
    pub args: Vec<i32>,
    /// Umbral k, no nulo solo en compuertas at-least.
    pub min_number: u16,
    pub(crate) order: u32,
}

impl Gate {
    /// Pares (negado, índice absoluto) en orden de declaración.
    pub fn arg_pairs(&self) -> impl Iterator<Item = (bool, i32)> + '_ {
        self.args.iter().map(|&signed| (signed < 0, signed.abs()))
    }

    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.args.len()
    }
}

/// Nodo del PDAG.
#[derive(Debug, Clone)]
pub enum Node {
    Variable(Variable),
    Gate(Gate),
}

impl Node {
    #[inline]
    pub fn index(&self) -> i32 {
        match self {
            Node::Variable(variable) => variable.index,
            Node::Gate(gate) => gate.index,
        }
    }

    /// Orden topológico por capas, asignado por
    /// [`crate::toposort::layered_topological_order`].
    #[inline]
    pub fn order(&self) -> u32 {
        match self {
            Node::Variable(variable) => variable.order,
            Node::Gate(gate) => gate.order,
        }
    }

    #[inline]
    pub(crate) fn set_order(&mut self, order: u32) {
        match self {
            Node::Variable(variable) => variable.order = order,
            Node::Gate(gate) => gate.order = order,
        }
    }
}

/// Descriptor de un evento básico con su expresión de probabilidad.
#[derive(Debug, Clone)]
pub struct BasicEvent {
    pub index: i32,
    pub expression: Expression,
}

impl BasicEvent {
    /// Probabilidad puntual del evento.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.expression.value()
    }
}

/// Grafo de propagación booleano con hojas probabilistas.
#[derive(Debug, Clone)]
pub struct Pdag {
    root_index: i32,
    nodes: BTreeMap<i32, Node>,
    basic_events: BTreeMap<i32, BasicEvent>,
}

impl Pdag {
    pub fn builder() -> PdagBuilder {
        PdagBuilder::default()
    }

    #[inline]
    pub fn root_index(&self) -> i32 {
        self.root_index
    }

    pub fn node(&self, index: i32) -> Option<&Node> {
        self.nodes.get(&index)
    }

    pub(crate) fn node_mut(&mut self, index: i32) -> Option<&mut Node> {
        self.nodes.get_mut(&index)
    }

    /// Nodos en orden de índice estable.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn basic_event(&self, index: i32) -> Option<&BasicEvent> {
        self.basic_events.get(&index)
    }

    pub fn basic_events(&self) -> impl Iterator<Item = &BasicEvent> {
        self.basic_events.values()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// Constructor validante del PDAG.
#[derive(Debug, Default)]
pub struct PdagBuilder {
    basic_events: Vec<(i32, f64)>,
    gates: Vec<(i32, Connective, Vec<i32>, u16)>,
    root_index: Option<i32>,
}

impl PdagBuilder {
    /// Declara un evento básico con probabilidad puntual.
    pub fn basic_event(mut self, index: i32, probability: f64) -> Self {
        self.basic_events.push((index, probability));
        self
    }

    /// Declara una compuerta lógica con argumentos con signo.
    pub fn gate(mut self, index: i32, connective: Connective, args: Vec<i32>) -> Self {
        self.gates.push((index, connective, args, 0));
        self
    }

    /// Declara una compuerta K-de-N con umbral `min_number`.
    pub fn atleast_gate(mut self, index: i32, args: Vec<i32>, min_number: u16) -> Self {
        self.gates.push((index, Connective::Atleast, args, min_number));
        self
    }

    /// Fija el índice del nodo raíz.
    pub fn root(mut self, index: i32) -> Self {
        self.root_index = Some(index);
        self
    }

    /// Sella el grafo validando la consistencia del modelo.
    pub fn build(self) -> Result<Pdag, PdagError> {
        let mut nodes: BTreeMap<i32, Node> = BTreeMap::new();
        let mut basic_events: BTreeMap<i32, BasicEvent> = BTreeMap::new();

        for (index, probability) in self.basic_events {
            if index <= 0 {
                return Err(PdagError::NonPositiveIndex(index));
            }
            if !(0.0..=1.0).contains(&probability) {
                return Err(PdagError::InvalidProbability {
                    index,
                    value: probability,
                });
            }
            if nodes.contains_key(&index) {
                return Err(PdagError::DuplicateIndex(index));
            }
            nodes.insert(index, Node::Variable(Variable { index, order: 0 }));
            basic_events.insert(
                index,
                BasicEvent {
                    index,
                    expression: Expression::Constant(probability),
                },
            );
        }

        for (index, connective, args, min_number) in self.gates {
            if index <= 0 {
                return Err(PdagError::NonPositiveIndex(index));
            }
            if args.iter().any(|&signed| signed == 0) {
                return Err(PdagError::NonPositiveIndex(0));
            }
            if nodes.contains_key(&index) {
                return Err(PdagError::DuplicateIndex(index));
            }
            if connective.is_unary() && args.len() != 1 {
                return Err(PdagError::UnaryArity {
                    gate_index: index,
                    num_inputs: args.len(),
                });
            }
            if connective == Connective::Atleast && min_number as usize > args.len() + 1 {
                return Err(PdagError::AtleastThreshold {
                    gate_index: index,
                    min_number,
                    num_inputs: args.len(),
                });
            }
            nodes.insert(
                index,
                Node::Gate(Gate {
                    index,
                    connective,
                    args,
                    min_number,
                    order: 0,
                }),
            );
        }

        let root_index = self.root_index.ok_or(PdagError::MissingRoot(0))?;
        if !nodes.contains_key(&root_index) {
            return Err(PdagError::MissingRoot(root_index));
        }

        Ok(Pdag {
            root_index,
            nodes,
            basic_events,
        })
    }
}
