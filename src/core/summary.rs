//! Plain-text summaries of each calculation, used as context for the advisory service.

use super::types::{
    GoalParameters, GoalSolution, InvestmentParameters, InvestmentProjection, LoanParameters,
    LoanSummary,
};

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// Amounts must be finite and below `u64::MAX` cents; anything else renders as `R$ --`.
pub fn format_currency(value: f64) -> String {
    debug_assert!(value.is_finite(), "non-finite amount {value}");
    if !value.is_finite() || value.abs() * 100.0 >= u64::MAX as f64 {
        return "R$ --".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction:02}")
}

pub fn investment_context(params: &InvestmentParameters, projection: &InvestmentProjection) -> String {
    format!(
        "Simulação de Juros Compostos:\n\
         Valor Inicial: {}\n\
         Aporte Mensal: {}\n\
         Taxa Anual: {}%\n\
         Período: {} anos\n\
         Resultado Final: {}\n\
         Total de Juros Ganhos: {}",
        format_currency(params.initial_amount),
        format_currency(params.monthly_contribution),
        params.annual_rate_percent,
        params.period_years,
        format_currency(projection.final_balance),
        format_currency(projection.total_interest),
    )
}

pub fn loan_context(params: &LoanParameters, summary: &LoanSummary) -> String {
    format!(
        "Simulação de Financiamento:\n\
         Valor Financiado: {}\n\
         Taxa Anual: {}%\n\
         Prazo: {} meses\n\
         Parcela Mensal: {}\n\
         Total a Pagar: {}\n\
         Total em Juros: {}",
        format_currency(params.principal),
        params.annual_rate_percent,
        params.term_months,
        format_currency(summary.monthly_payment),
        format_currency(summary.total_payment),
        format_currency(summary.total_interest),
    )
}

pub fn goal_context(params: &GoalParameters, solution: &GoalSolution) -> String {
    format!(
        "Simulação de Meta Financeira:\n\
         Objetivo Final: {}\n\
         Já Economizado: {}\n\
         Expectativa de Rendimento: {}% aa\n\
         Prazo Alvo: {} meses\n\
         Aporte Mensal Sugerido: {}",
        format_currency(params.target_amount),
        format_currency(params.current_savings),
        params.annual_rate_percent,
        params.timeframe_months,
        format_currency(solution.required_monthly_contribution),
    )
}
