//! Function descriptor catalogue
//!
//! Immutable records for the selectable activation/test functions. Plotters
//! hold an ordered list of kinds and look descriptors up here.

use serde::{Deserialize, Serialize};

use crate::renderer::Rgba;

/// Selectable function kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Sigmoid,
    Relu,
    Tanh,
    Sine,
    Gaussian,
    Softplus,
    Linear,
    Exponential,
}

impl FunctionKind {
    /// All kinds in catalogue order
    pub const ALL: [FunctionKind; 8] = [
        FunctionKind::Sigmoid,
        FunctionKind::Relu,
        FunctionKind::Tanh,
        FunctionKind::Sine,
        FunctionKind::Gaussian,
        FunctionKind::Softplus,
        FunctionKind::Linear,
        FunctionKind::Exponential,
    ];

    /// The activation functions offered by the surface plotter
    pub const ACTIVATIONS: [FunctionKind; 5] = [
        FunctionKind::Relu,
        FunctionKind::Sigmoid,
        FunctionKind::Tanh,
        FunctionKind::Softplus,
        FunctionKind::Linear,
    ];

    pub fn descriptor(self) -> &'static FunctionDescriptor {
        &CATALOG[self as usize]
    }
}

/// Immutable description of a plottable function
#[derive(Debug)]
pub struct FunctionDescriptor {
    pub kind: FunctionKind,
    pub name: &'static str,
    /// Display formula
    pub formula: &'static str,
    pub color: Rgba,
    pub eval: fn(f32) -> f32,
    pub derivative: fn(f32) -> f32,
    pub description: &'static str,
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn sigmoid_prime(x: f32) -> f32 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

fn relu(x: f32) -> f32 {
    x.max(0.0)
}

fn relu_prime(x: f32) -> f32 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

fn tanh(x: f32) -> f32 {
    x.tanh()
}

fn tanh_prime(x: f32) -> f32 {
    let t = x.tanh();
    1.0 - t * t
}

fn sine(x: f32) -> f32 {
    x.sin()
}

fn sine_prime(x: f32) -> f32 {
    x.cos()
}

fn gaussian(x: f32) -> f32 {
    (-x * x).exp()
}

fn gaussian_prime(x: f32) -> f32 {
    -2.0 * x * (-x * x).exp()
}

// ln(1 + e^x) without overflow for large x
fn softplus(x: f32) -> f32 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

fn linear(x: f32) -> f32 {
    x
}

fn one(_: f32) -> f32 {
    1.0
}

fn exponential(x: f32) -> f32 {
    x.exp()
}

/// Catalogue, indexed by `FunctionKind as usize`
pub static CATALOG: [FunctionDescriptor; 8] = [
    FunctionDescriptor {
        kind: FunctionKind::Sigmoid,
        name: "Sigmoid",
        formula: "f(x) = 1/(1+e^(-x))",
        color: Rgba::rgb(66, 135, 245),
        eval: sigmoid,
        derivative: sigmoid_prime,
        description: "Squashes values between 0 and 1. Used for binary classification output layers.",
    },
    FunctionDescriptor {
        kind: FunctionKind::Relu,
        name: "ReLU",
        formula: "f(x) = max(0, x)",
        color: Rgba::rgb(255, 71, 71),
        eval: relu,
        derivative: relu_prime,
        description: "Returns 0 for negative inputs and x for positive inputs. Used in hidden layers of deep neural networks.",
    },
    FunctionDescriptor {
        kind: FunctionKind::Tanh,
        name: "Tanh",
        formula: "f(x) = tanh(x)",
        color: Rgba::rgb(66, 245, 158),
        eval: tanh,
        derivative: tanh_prime,
        description: "Squashes values between -1 and 1. Similar to sigmoid but zero-centered.",
    },
    FunctionDescriptor {
        kind: FunctionKind::Sine,
        name: "Sine",
        formula: "f(x) = sin(x)",
        color: Rgba::rgb(255, 149, 0),
        eval: sine,
        derivative: sine_prime,
        description: "Periodic activation used in implicit neural representations.",
    },
    FunctionDescriptor {
        kind: FunctionKind::Gaussian,
        name: "Gaussian",
        formula: "f(x) = e^(-x²)",
        color: Rgba::rgb(175, 82, 222),
        eval: gaussian,
        derivative: gaussian_prime,
        description: "Bell curve peaking at 1 for x = 0. Used in radial basis function networks.",
    },
    FunctionDescriptor {
        kind: FunctionKind::Softplus,
        name: "Softplus",
        formula: "f(x) = ln(1+e^x)",
        color: Rgba::rgb(245, 66, 224),
        eval: softplus,
        derivative: sigmoid,
        description: "A smooth approximation to ReLU with better mathematical properties.",
    },
    FunctionDescriptor {
        kind: FunctionKind::Linear,
        name: "Linear",
        formula: "f(x) = x",
        color: Rgba::rgb(245, 167, 66),
        eval: linear,
        derivative: one,
        description: "Simple identity function. Used in regression output layers.",
    },
    FunctionDescriptor {
        kind: FunctionKind::Exponential,
        name: "Exponential",
        formula: "f(x) = e^x",
        color: Rgba::new(0, 122, 255, 0.8),
        eval: exponential,
        derivative: exponential,
        description: "Grows without bound. Shows how quickly unsquashed activations explode.",
    },
];

/// Names of `kinds`, in order (the selection cycle of a plotter)
pub fn names(kinds: &[FunctionKind]) -> Vec<&'static str> {
    kinds.iter().map(|k| k.descriptor().name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_catalog_indexed_by_kind() {
        for kind in FunctionKind::ALL {
            assert_eq!(kind.descriptor().kind, kind);
        }
    }

    #[test]
    fn test_values_at_zero() {
        let at_zero = |k: FunctionKind| (k.descriptor().eval)(0.0);
        assert!((at_zero(FunctionKind::Sigmoid) - 0.5).abs() < EPS);
        assert_eq!(at_zero(FunctionKind::Relu), 0.0);
        assert_eq!(at_zero(FunctionKind::Tanh), 0.0);
        assert_eq!(at_zero(FunctionKind::Sine), 0.0);
        assert!((at_zero(FunctionKind::Gaussian) - 1.0).abs() < EPS);
        assert!((at_zero(FunctionKind::Softplus) - std::f32::consts::LN_2).abs() < EPS);
        assert_eq!(at_zero(FunctionKind::Linear), 0.0);
        assert!((at_zero(FunctionKind::Exponential) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_softplus_large_inputs_stay_finite() {
        let f = FunctionKind::Softplus.descriptor().eval;
        assert!((f(100.0) - 100.0).abs() < 1e-3);
        assert!(f(-100.0) >= 0.0 && f(-100.0) < 1e-6);
    }

    #[test]
    fn test_derivatives_match_finite_difference() {
        let h = 1e-2_f32;
        let xs = [-2.3_f32, -0.7, 0.4, 1.9];
        for kind in FunctionKind::ALL {
            let d = kind.descriptor();
            for x in xs {
                let numeric = ((d.eval)(x + h) - (d.eval)(x - h)) / (2.0 * h);
                let analytic = (d.derivative)(x);
                assert!(
                    (numeric - analytic).abs() < 1e-2 * analytic.abs().max(1.0),
                    "{} at {}: numeric {} analytic {}",
                    d.name,
                    x,
                    numeric,
                    analytic
                );
            }
        }
    }

    #[test]
    fn test_names_follow_order() {
        assert_eq!(
            names(&FunctionKind::ACTIVATIONS),
            vec!["ReLU", "Sigmoid", "Tanh", "Softplus", "Linear"]
        );
    }

    #[test]
    fn test_kind_deserializes_lowercase() {
        let kinds: Vec<FunctionKind> = serde_json::from_str(r#"["relu", "gaussian"]"#).unwrap();
        assert_eq!(kinds, vec![FunctionKind::Relu, FunctionKind::Gaussian]);
    }
}
