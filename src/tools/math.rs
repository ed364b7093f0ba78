//! Math Tool Module
//!
//! Solves math input by classification: pure arithmetic runs through the
//! memoizing evaluator on the CPU pool; anything else is phrased as a
//! natural-language problem for the LLM backend on the I/O pool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::backends::LlmBackend;
use crate::error::GatewayError;
use crate::eval::{self, MemoEvaluator};
use crate::exec::ExecPools;
use crate::tools::Tool;

/// Instruction prefix for the LLM fallback.
const SOLVE_PREFIX: &str =
    "Solve the following math problem and return only the final answer: ";

// == Math Tool ==
/// Arithmetic evaluation with an LLM fallback for word problems.
pub struct MathTool {
    pools: ExecPools,
    evaluator: Arc<MemoEvaluator>,
    llm: Arc<dyn LlmBackend>,
}

impl MathTool {
    pub fn new(pools: ExecPools, evaluator: Arc<MemoEvaluator>, llm: Arc<dyn LlmBackend>) -> Self {
        Self {
            pools,
            evaluator,
            llm,
        }
    }

    async fn solve_arithmetic(&self, expression: &str) -> String {
        let evaluator = self.evaluator.clone();
        let owned = expression.to_string();
        let outcome = self
            .pools
            .cpu
            .submit(move || evaluator.evaluate_cached(&owned))
            .await;

        match outcome {
            Ok(value) => value.to_string(),
            Err(GatewayError::Evaluation(msg)) | Err(GatewayError::Pool(msg)) => {
                warn!(expression, error = %msg, "arithmetic evaluation failed");
                format!("Math error: {msg}")
            }
            Err(other) => format!("Math error: {other}"),
        }
    }

    async fn solve_with_llm(&self, problem: &str) -> String {
        let llm = self.llm.clone();
        let prompt = format!("{SOLVE_PREFIX}{problem}");
        let outcome = self
            .pools
            .io
            .submit(async move { llm.complete(&prompt).await })
            .await;

        match outcome {
            Ok(Ok(response)) => response.trim().to_string(),
            Ok(Err(backend_err)) => {
                warn!(problem, error = %backend_err, "LLM math fallback failed");
                format!("Math error: {backend_err}")
            }
            Err(pool_err) => format!("Math error: {pool_err}"),
        }
    }
}

#[async_trait]
impl Tool for MathTool {
    fn name(&self) -> &str {
        "math_solver"
    }

    fn description(&self) -> &str {
        "Solve a math expression or word problem"
    }

    async fn invoke(&self, input: &str) -> String {
        if eval::is_arithmetic(input) {
            debug!(input, "dispatching arithmetic to CPU pool");
            self.solve_arithmetic(input).await
        } else {
            debug!(input, "dispatching word problem to LLM");
            self.solve_with_llm(input).await
        }
    }
}
