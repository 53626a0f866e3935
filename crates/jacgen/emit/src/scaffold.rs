//! Fixed boilerplate around the generated routines.
//!
//! The scaffold references the external `DualVar` type and the
//! `newton::CudaFunctionWrapper` registration helper. Neither is modelled
//! here; the text only has to make the header a valid compilation unit for
//! that toolchain.

use serde::{Deserialize, Serialize};

use crate::module::ModuleDims;

/// Includes and namespace wrapped around the emitted routines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scaffold {
    /// `#include` targets, with their `<>` or `""` delimiters.
    pub includes: Vec<String>,
    pub namespace: String,
}

impl Default for Scaffold {
    fn default() -> Self {
        Self {
            includes: vec![
                "<Eigen/Dense>".into(),
                "<cmath>".into(),
                "\"../../autodiff/forward/CudaSupport.hpp\"".into(),
                "\"../../autodiff/forward/autodiff.hpp\"".into(),
                "\"Jacobian.hpp\"".into(),
            ],
            namespace: "testfun".into(),
        }
    }
}

impl Scaffold {
    /// Header, aliases, constants, and the opening of `test_fun`.
    pub fn write_prologue(&self, out: &mut String, dims: &ModuleDims) {
        out.push_str("#pragma once\n");
        for include in &self.includes {
            out.push_str(&format!("#include {}\n", include));
        }
        out.push_str(
            "\n\
             using dv = autodiff::forward::DualVar<double>;\n\
             using dvec = Eigen::Matrix<dv, Eigen::Dynamic, 1>;\n\
             \n",
        );
        out.push_str(&format!("namespace {} {{\n", self.namespace));
        out.push_str(&format!(
            "    constexpr int input_dim = {};\n\
             \x20   constexpr int output_dim = {};\n\
             \x20   constexpr int complexity = {};\n\
             \n\
             \x20   dvec test_fun(const dvec &x) {{\n\
             \x20       dvec res({});\n\
             \x20       dv acc;\n",
            dims.input_dim, dims.output_dim, dims.complexity, dims.output_dim
        ));
    }

    /// Close `test_fun` and open the CUDA switch routine.
    pub fn write_accelerated_prologue(&self, out: &mut String) {
        out.push_str(
            "        \n\
             \x20       return res;\n\
             \x20   }\n\
             \n\
             \x20   #ifdef USE_CUDA\n\
             \n\
             \x20   CUDA_DEVICE dv cu_f0(const dvec &x, const int y) { \n\
             \x20       dv acc = 0;\n\
             \x20       switch (y)\n\
             \x20       {\n",
        );
    }

    /// Close the switch, register the routine, and close the namespace.
    pub fn write_epilogue(&self, out: &mut String) {
        out.push_str(
            "        default:\n\
             \x20           break;\n\
             \x20       }\n\
             \x20       return acc;\n\
             \x20   };\n\
             \n\
             \x20   newton::CudaFunctionWrapper<double> createcudafn() {\n\
             \x20       newton::CudaFunctionWrapper<double> cudafun;\n\
             \x20       cudafun.register_fn_host<cu_f0>();\n\
             \x20       return cudafun;\n\
             \x20   }\n\
             \x20   #endif\n",
        );
        out.push_str(&format!("}} // namespace {}\n", self.namespace));
    }
}
