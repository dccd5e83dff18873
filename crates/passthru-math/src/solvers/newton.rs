//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{secant, SolverConfig, SolverMethod, SolverResult, MIN_DERIVATIVE};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// This method has quadratic convergence near the root but requires
/// the derivative of the function.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or an error if convergence fails.
///
/// # Example
///
/// ```rust
/// use passthru_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(MathError::NonFinite { x });
        }

        if fx.abs() <= config.tolerance {
            return Ok(converged(x, iteration, fx, SolverMethod::Newton));
        }

        let dfx = df(x);
        if !dfx.is_finite() || dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;
        log::trace!("newton iteration {iteration}: x = {x}, f = {fx:e}");

        if step.abs() < config.tolerance {
            let final_fx = f(x);
            if !final_fx.is_finite() {
                return Err(MathError::NonFinite { x });
            }
            return Ok(converged(x, iteration + 1, final_fx, SolverMethod::Newton));
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

/// Newton-Raphson with a central-difference derivative.
///
/// `f'(x)` is estimated as `(f(x + bump) - f(x - bump)) / (2 bump)`.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `initial_guess` - Starting point for the iteration
/// * `bump` - Half-width of the difference stencil
/// * `config` - Solver configuration
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    bump: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if !(bump > 0.0 && bump.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "derivative bump must be positive, got {bump}"
        )));
    }

    let df = |x: f64| central_difference(&f, x, bump);

    newton_raphson(&f, df, initial_guess, config)
}

/// Numerical Newton with a secant fallback.
///
/// Runs Newton with a central-difference derivative. If the derivative is
/// zero or non-finite, or a Newton step lands where `f` is not finite, the
/// search switches to the secant method seeded with the last two points at
/// which `f` was finite. The iteration budget in `config` covers both
/// phases.
///
/// With no earlier point to pair with, the secant is seeded at
/// `x + 0.1 * max(|x|, 1)`.
///
/// # Errors
///
/// * `MathError::NonFinite` if `f` is not finite at the initial guess or
///   the secant phase steps outside the domain of `f`.
/// * `MathError::ConvergenceFailed` if the budget runs out.
/// * `MathError::DivisionByZero` if the secant line is flat.
pub fn newton_secant<F>(
    f: F,
    initial_guess: f64,
    bump: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if !(bump > 0.0 && bump.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "derivative bump must be positive, got {bump}"
        )));
    }

    let mut x = initial_guess;
    let mut fx = f(x);
    if !fx.is_finite() {
        return Err(MathError::NonFinite { x });
    }
    let mut prev: Option<f64> = None;

    for iteration in 0..config.max_iterations {
        if fx.abs() <= config.tolerance {
            return Ok(converged(x, iteration, fx, SolverMethod::Newton));
        }

        let dfx = central_difference(&f, x, bump);
        if !dfx.is_finite() || dfx.abs() < MIN_DERIVATIVE {
            log::warn!("newton derivative {dfx:e} at x = {x}, falling back to secant");
            return secant_fallback(&f, prev, x, iteration, config);
        }

        let step = fx / dfx;
        let next = x - step;
        let f_next = f(next);
        log::trace!("newton iteration {iteration}: x = {next}, f = {f_next:e}");

        if !f_next.is_finite() {
            log::warn!("newton step to x = {next} left the domain, falling back to secant");
            return secant_fallback(&f, prev, x, iteration + 1, config);
        }

        prev = Some(x);
        x = next;
        fx = f_next;

        if step.abs() < config.tolerance {
            return Ok(converged(x, iteration + 1, fx, SolverMethod::Newton));
        }
    }

    if fx.abs() <= config.tolerance {
        return Ok(converged(x, config.max_iterations, fx, SolverMethod::Newton));
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

fn secant_fallback<F>(
    f: &F,
    prev: Option<f64>,
    x: f64,
    used: u32,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let remaining = config.max_iterations.saturating_sub(used);
    if remaining == 0 {
        return Err(MathError::convergence_failed(config.max_iterations, f(x).abs()));
    }

    let seed = prev.unwrap_or_else(|| x + 0.1 * x.abs().max(1.0));
    let result = secant(f, seed, x, &config.with_max_iterations(remaining)).map_err(
        |err| match err {
            MathError::ConvergenceFailed { residual, .. } => {
                MathError::convergence_failed(config.max_iterations, residual)
            }
            other => other,
        },
    )?;

    Ok(SolverResult {
        iterations: used + result.iterations,
        ..result
    })
}

fn central_difference<F>(f: &F, x: f64, bump: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + bump) - f(x - bump)) / (2.0 * bump)
}

fn converged(root: f64, iterations: u32, residual: f64, method: SolverMethod) -> SolverResult {
    log::debug!("{method} converged in {iterations} iterations: root = {root}, residual = {residual:e}");
    SolverResult {
        root,
        iterations,
        residual,
        method,
    }
}
