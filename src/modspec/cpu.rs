//! CPU implementation of the modulation spectrum.

use super::impl_generic::{modspec_backward_impl, modspec_forward_impl};
use super::traits::ModulationSpectrumAlgorithms;
use super::{ModSpecContext, ModSpecParams};
use crate::error::ModSpecResult;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl ModulationSpectrumAlgorithms<CpuRuntime> for CpuClient {
    fn modspec_forward(
        &self,
        y: &Tensor<CpuRuntime>,
        params: ModSpecParams,
    ) -> ModSpecResult<(Tensor<CpuRuntime>, ModSpecContext<CpuRuntime>)> {
        modspec_forward_impl(self, y, params)
    }

    fn modspec_backward(
        &self,
        ctx: &ModSpecContext<CpuRuntime>,
        grad_spectrum: &Tensor<CpuRuntime>,
    ) -> ModSpecResult<Tensor<CpuRuntime>> {
        modspec_backward_impl(self, ctx, grad_spectrum)
    }
}
