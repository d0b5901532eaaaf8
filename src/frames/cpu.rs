//! CPU implementation of frame utilities.

use super::FrameAlignParams;
use super::impl_generic::{
    adjust_frame_length_impl, delta_impl, dimension_wise_delta_impl, remove_zeros_frames_impl,
    trim_zeros_frames_impl,
};
use super::traits::FrameAlgorithms;
use crate::error::ModSpecResult;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl FrameAlgorithms<CpuRuntime> for CpuClient {
    fn trim_zeros_frames(
        &self,
        x: &Tensor<CpuRuntime>,
        eps: f64,
    ) -> ModSpecResult<Tensor<CpuRuntime>> {
        trim_zeros_frames_impl(self, x, eps)
    }

    fn remove_zeros_frames(
        &self,
        x: &Tensor<CpuRuntime>,
        eps: f64,
    ) -> ModSpecResult<Tensor<CpuRuntime>> {
        remove_zeros_frames_impl(self, x, eps)
    }

    fn adjust_frame_length(
        &self,
        x: &Tensor<CpuRuntime>,
        y: &Tensor<CpuRuntime>,
        params: FrameAlignParams,
    ) -> ModSpecResult<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        adjust_frame_length_impl(self, x, y, params)
    }

    fn delta(
        &self,
        x: &Tensor<CpuRuntime>,
        window: &Tensor<CpuRuntime>,
    ) -> ModSpecResult<Tensor<CpuRuntime>> {
        delta_impl(self, x, window)
    }

    fn dimension_wise_delta(
        &self,
        x: &Tensor<CpuRuntime>,
        window: &Tensor<CpuRuntime>,
    ) -> ModSpecResult<Tensor<CpuRuntime>> {
        dimension_wise_delta_impl(self, x, window)
    }
}
