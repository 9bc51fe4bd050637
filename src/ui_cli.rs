//! 텍스트 출력. 계산은 하지 않고 결과 레코드만 표시한다.

use crate::chart::CopChart;
use crate::heat_pump::{BalanceOutcome, CopEstimate, DivergenceReason};
use crate::i18n::{keys, Translator};
use crate::limits::{LimitedRun, Outcome, SoftLimit};
use crate::physics::reference::ApproximationCheck;
use crate::system::{DispatchMode, LimitReason, SimulationResult};

/// 한계 위반 한 줄. 수치는 언어팩 문구에 끼워 넣는다.
pub fn limit_line(tr: &Translator, limit: &SoftLimit) -> String {
    let (value, bound) = limit.values();
    let detail = tr
        .t(keys::LIMIT_DETAIL)
        .replace("{value}", &format!("{value:.1}"))
        .replace("{bound}", &format!("{bound:.1}"));
    format!("- {}: {detail}", tr.t(limit.key()))
}

/// 한계 위반 메시지와 폴백 COP를 출력한다.
pub fn print_limited(tr: &Translator, run: &LimitedRun) {
    println!("{}", tr.t(keys::LIMIT_HEADING));
    println!("{}", limit_line(tr, &run.limit));
    if let Some(cop) = &run.cop {
        println!("{} {:.2}", tr.t(keys::LIMIT_FALLBACK_COP), cop.cop);
    }
}

pub fn print_simulation(tr: &Translator, outcome: &Outcome<Box<SimulationResult>>) {
    let r = match outcome {
        Outcome::Completed(result) => result,
        Outcome::Limited(run) => return print_limited(tr, run),
    };

    println!("{}", tr.t(keys::SIM_HEADING));
    println!("{} {:?}", tr.t(keys::SIM_TOPOLOGY), r.topology);
    let manual = if r.cop_is_manual { tr.t(keys::MANUAL_TAG) } else { "" };
    println!("{} {:.2} {manual}", tr.t(keys::SIM_COP), r.cop);
    println!("{} {:.1}", tr.t(keys::SIM_LIFT), r.lift_k);
    if let Some(ratio) = r.pressure_ratio {
        println!("{} {ratio:.2}", tr.t(keys::SIM_PRESSURE_RATIO));
    }
    println!("{} {:.1}", tr.t(keys::SIM_RECOVERED), r.recovered_heat_kw);
    println!("{} {:.1}", tr.t(keys::SIM_DRIVE), r.drive_energy_kw);
    if let Some(reason) = r.limit_reason {
        let text = match reason {
            LimitReason::SinkLimited => tr.t(keys::SIM_SINK_LIMITED),
            LimitReason::SourceLimited => tr.t(keys::SIM_SOURCE_LIMITED),
        };
        println!("{} {text}", tr.t(keys::SIM_LIMIT_REASON));
    }
    println!("{} {:.0}", tr.t(keys::SIM_ANNUAL_SAVING), r.annual_saving);
    println!("{} {:.1}", tr.t(keys::SIM_PAYBACK), r.payback_years);
    println!("{} {:.1}", tr.t(keys::SIM_BASELINE_COST), r.baseline_cost_per_hour);
    println!("{} {:.1}", tr.t(keys::SIM_COST_PER_HOUR), r.cost_per_hour);
    println!("{} {:.1}", tr.t(keys::SIM_CO2_REDUCTION), r.co2_reduction_rate);
    println!("{} {:.2}", tr.t(keys::SIM_PER), r.primary_energy_ratio);
    println!(
        "{} {:.2} / {:.2} / {:.2}",
        tr.t(keys::SIM_STEAM_TONS),
        r.steam_tons.total,
        r.steam_tons.heat_pump,
        r.steam_tons.boiler
    );

    if let Some(src) = &r.source {
        println!("\n[{}]", tr.t(keys::SIM_SOURCE_POTENTIAL));
        println!("  {} {:.1}", tr.t(keys::SIM_FLUE_FLOW), src.flue_gas_flow_m3_per_h);
        println!("  {} {:.1}", tr.t(keys::SIM_SENSIBLE), src.sensible_kw);
        println!("  {} {:.1}", tr.t(keys::SIM_LATENT), src.latent_kw);
        println!("  {} {:.1}", tr.t(keys::SIM_DEW_POINT), src.dew_point_c);
        if let Some(water) = &src.condensation {
            println!("  {} {:.2}", tr.t(keys::SIM_CONDENSATE), water.condensed_kg_per_h);
        }
    }

    if let Some(c) = &r.coupling {
        println!("\n[{}]", tr.t(keys::SIM_COUPLING));
        println!(
            "  {} {:.1} -> {:.1}",
            tr.t(keys::SIM_SITE_EFF),
            c.site_efficiency_before,
            c.site_efficiency_after
        );
        println!("  PER: {:.2} -> {:.2}", c.per_before, c.per_after);
    }

    if let Some(d) = &r.dispatch {
        let mode = match d.mode {
            DispatchMode::HeatPumpFirst => tr.t(keys::SIM_HP_FIRST),
            DispatchMode::BoilerFirst => tr.t(keys::SIM_BOILER_FIRST),
        };
        println!("{} {mode} ({:.1}/h)", tr.t(keys::SIM_DISPATCH), d.cost_per_hour);
    }

    let q = &r.request;
    println!("\n[{}]", tr.t(keys::SIM_REQUEST));
    println!(
        "  {:?}: {:.1} -> {:.1} °C | {:?}: {:.1} -> {:.1} °C | {:.0} kW",
        q.source, q.source_in_c, q.source_out_c, q.load, q.load_in_c, q.load_out_c, q.capacity_kw
    );

    println!(
        "\n{} {} - {}",
        tr.t(keys::SIM_DECISION),
        tr.t(r.decision.tier.key()),
        r.decision.narrative
    );
}

pub fn print_cop(tr: &Translator, est: &CopEstimate) {
    println!("{}", tr.t(keys::COP_HEADING));
    if let Some(limit) = &est.error {
        println!("{}", limit_line(tr, limit));
        println!("{} {:.2}", tr.t(keys::LIMIT_FALLBACK_COP), est.cop);
        return;
    }
    println!("{} {:.2}", tr.t(keys::SIM_COP), est.cop);
    println!("{} {:.1}", tr.t(keys::SIM_LIFT), est.lift_k);
    if let Some(ratio) = est.pressure_ratio {
        println!("{} {ratio:.2}", tr.t(keys::SIM_PRESSURE_RATIO));
    }
}

pub fn print_chart(tr: &Translator, chart: &CopChart) {
    println!("{}", tr.t(keys::CHART_HEADING));
    println!("{:>10} | COP", tr.t(chart.axis.key()));
    for p in &chart.points {
        match p.cop {
            Some(cop) => println!("{:>10.2} | {cop:.2}", p.x),
            None => println!("{:>10.2} | {}", p.x, tr.t(keys::CHART_GAP)),
        }
    }
    let op = &chart.operating_point;
    match op.cop {
        Some(cop) => println!("{} x={:.2}, COP={cop:.2}", tr.t(keys::CHART_OPERATING_POINT), op.x),
        None => println!(
            "{} x={:.2}, {}",
            tr.t(keys::CHART_OPERATING_POINT),
            op.x,
            tr.t(keys::CHART_GAP)
        ),
    }
    if let Some(p) = chart.nearest_to_operating_point() {
        println!("{} x={:.2}", tr.t(keys::CHART_NEAREST), p.x);
    }
}

pub fn print_balance(tr: &Translator, outcome: &Outcome<BalanceOutcome>) {
    let balance = match outcome {
        Outcome::Completed(balance) => balance,
        Outcome::Limited(run) => return print_limited(tr, run),
    };
    println!("{}", tr.t(keys::BALANCE_HEADING));
    match balance {
        BalanceOutcome::Converged(p) => {
            println!("{}", tr.t(keys::BALANCE_CONVERGED));
            println!("{} {:.2}", tr.t(keys::BALANCE_REQUIRED_FLUE_OUT), p.required_flue_out_c);
            println!("{} {:.2}", tr.t(keys::SIM_COP), p.cop);
            println!("{} {:.1}", tr.t(keys::BALANCE_TARGET_LOAD), p.target_load_kw);
            println!("{} {:.1}", tr.t(keys::BALANCE_SOURCE_TOTAL), p.source_total_kw);
            println!("{} {}", tr.t(keys::BALANCE_ITERATIONS), p.iterations);
        }
        BalanceOutcome::Diverged {
            iterations,
            last_flue_out_c,
            reason,
        } => {
            let key = match reason {
                DivergenceReason::SourceInsufficient => keys::BALANCE_SOURCE_INSUFFICIENT,
                DivergenceReason::MaxIterations => keys::BALANCE_MAX_ITERATIONS,
            };
            println!("{}", tr.t(key));
            println!("{} {last_flue_out_c:.2}", tr.t(keys::BALANCE_REQUIRED_FLUE_OUT));
            println!("{} {iterations}", tr.t(keys::BALANCE_ITERATIONS));
        }
    }
}

pub fn print_physics(tr: &Translator, check: &ApproximationCheck) {
    println!("{}", tr.t(keys::PHYSICS_HEADING));
    println!("P = {} MPa, T = {} °C", check.pressure_mpa, check.temperature_c);
    println!("{} {:.2}", tr.t(keys::PHYSICS_SAT_APPROX), check.approx_saturation_c);
    println!("{} {:.2}", tr.t(keys::PHYSICS_SAT_IF97), check.if97_saturation_c);
    println!("{} {:.1}", tr.t(keys::PHYSICS_H_APPROX), check.approx_enthalpy_kj_per_kg);
    println!("{} {:.1}", tr.t(keys::PHYSICS_H_IF97), check.if97_enthalpy_kj_per_kg);
    println!(
        "{} {:.2} / {:.2}",
        tr.t(keys::PHYSICS_ERROR),
        check.saturation_error_k(),
        check.enthalpy_error_ratio() * 100.0
    );
}
