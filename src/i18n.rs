use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const YES: &str = "general.yes";
    pub const NO: &str = "general.no";
    pub const MANUAL_TAG: &str = "general.manual";

    pub const SIM_HEADING: &str = "simulate.heading";
    pub const SIM_TOPOLOGY: &str = "simulate.topology";
    pub const SIM_COP: &str = "simulate.cop";
    pub const SIM_LIFT: &str = "simulate.lift";
    pub const SIM_PRESSURE_RATIO: &str = "simulate.pressure_ratio";
    pub const SIM_RECOVERED: &str = "simulate.recovered_heat";
    pub const SIM_DRIVE: &str = "simulate.drive_energy";
    pub const SIM_ANNUAL_SAVING: &str = "simulate.annual_saving";
    pub const SIM_PAYBACK: &str = "simulate.payback";
    pub const SIM_COST_PER_HOUR: &str = "simulate.cost_per_hour";
    pub const SIM_BASELINE_COST: &str = "simulate.baseline_cost";
    pub const SIM_CO2_REDUCTION: &str = "simulate.co2_reduction";
    pub const SIM_PER: &str = "simulate.per";
    pub const SIM_DECISION: &str = "simulate.decision";
    pub const SIM_LIMIT_REASON: &str = "simulate.limit_reason";
    pub const SIM_SINK_LIMITED: &str = "simulate.sink_limited";
    pub const SIM_SOURCE_LIMITED: &str = "simulate.source_limited";
    pub const SIM_STEAM_TONS: &str = "simulate.steam_tons";
    pub const SIM_COUPLING: &str = "simulate.coupling";
    pub const SIM_SITE_EFF: &str = "simulate.site_efficiency";
    pub const SIM_DISPATCH: &str = "simulate.dispatch";
    pub const SIM_HP_FIRST: &str = "simulate.heat_pump_first";
    pub const SIM_BOILER_FIRST: &str = "simulate.boiler_first";
    pub const SIM_REQUEST: &str = "simulate.request";
    pub const SIM_SOURCE_POTENTIAL: &str = "simulate.source_potential";
    pub const SIM_SENSIBLE: &str = "simulate.sensible";
    pub const SIM_LATENT: &str = "simulate.latent";
    pub const SIM_DEW_POINT: &str = "simulate.dew_point";
    pub const SIM_CONDENSATE: &str = "simulate.condensate";
    pub const SIM_FLUE_FLOW: &str = "simulate.flue_flow";

    pub const LIMIT_HEADING: &str = "limit.heading";
    pub const LIMIT_FALLBACK_COP: &str = "limit.fallback_cop";
    pub const LIMIT_EVAP_TOO_COLD: &str = "limit.evap_too_cold";
    pub const LIMIT_COND_TOO_HOT: &str = "limit.cond_too_hot";
    pub const LIMIT_LIFT_TOO_SMALL: &str = "limit.lift_too_small";
    pub const LIMIT_FLUE_TOO_COLD: &str = "limit.flue_too_cold";
    pub const LIMIT_ENTHALPY_SPAN: &str = "limit.enthalpy_span";
    /// `{value}`, `{bound}` 자리표시자를 쓴다
    pub const LIMIT_DETAIL: &str = "limit.detail";

    pub const DECISION_STRONG: &str = "decision.strong";
    pub const DECISION_CONSIDER: &str = "decision.consider";
    pub const DECISION_NOT_RECOMMENDED: &str = "decision.not_recommended";

    pub const COP_HEADING: &str = "cop.heading";

    pub const CHART_HEADING: &str = "chart.heading";
    pub const CHART_GAP: &str = "chart.gap";
    pub const CHART_OPERATING_POINT: &str = "chart.operating_point";
    pub const CHART_NEAREST: &str = "chart.nearest";
    pub const AXIS_FLUE_OUTLET: &str = "axis.flue_outlet";
    pub const AXIS_PRESSURE: &str = "axis.pressure";
    pub const AXIS_SOURCE_TEMP: &str = "axis.source_temperature";

    pub const BALANCE_HEADING: &str = "balance.heading";
    pub const BALANCE_CONVERGED: &str = "balance.converged";
    pub const BALANCE_REQUIRED_FLUE_OUT: &str = "balance.required_flue_out";
    pub const BALANCE_ITERATIONS: &str = "balance.iterations";
    pub const BALANCE_TARGET_LOAD: &str = "balance.target_load";
    pub const BALANCE_SOURCE_TOTAL: &str = "balance.source_total";
    pub const BALANCE_SOURCE_INSUFFICIENT: &str = "balance.source_insufficient";
    pub const BALANCE_MAX_ITERATIONS: &str = "balance.max_iterations";

    pub const PHYSICS_HEADING: &str = "physics.heading";
    pub const PHYSICS_SAT_APPROX: &str = "physics.saturation_approx";
    pub const PHYSICS_SAT_IF97: &str = "physics.saturation_if97";
    pub const PHYSICS_H_APPROX: &str = "physics.enthalpy_approx";
    pub const PHYSICS_H_IF97: &str = "physics.enthalpy_if97";
    pub const PHYSICS_ERROR: &str = "physics.error";

    /// 내장 언어표가 모두 채워야 하는 키.
    pub const ALL: &[&str] = &[
        ERROR_PREFIX,
        YES,
        NO,
        MANUAL_TAG,
        SIM_HEADING,
        SIM_TOPOLOGY,
        SIM_COP,
        SIM_LIFT,
        SIM_PRESSURE_RATIO,
        SIM_RECOVERED,
        SIM_DRIVE,
        SIM_ANNUAL_SAVING,
        SIM_PAYBACK,
        SIM_COST_PER_HOUR,
        SIM_BASELINE_COST,
        SIM_CO2_REDUCTION,
        SIM_PER,
        SIM_DECISION,
        SIM_LIMIT_REASON,
        SIM_SINK_LIMITED,
        SIM_SOURCE_LIMITED,
        SIM_STEAM_TONS,
        SIM_COUPLING,
        SIM_SITE_EFF,
        SIM_DISPATCH,
        SIM_HP_FIRST,
        SIM_BOILER_FIRST,
        SIM_REQUEST,
        SIM_SOURCE_POTENTIAL,
        SIM_SENSIBLE,
        SIM_LATENT,
        SIM_DEW_POINT,
        SIM_CONDENSATE,
        SIM_FLUE_FLOW,
        LIMIT_HEADING,
        LIMIT_FALLBACK_COP,
        LIMIT_EVAP_TOO_COLD,
        LIMIT_COND_TOO_HOT,
        LIMIT_LIFT_TOO_SMALL,
        LIMIT_FLUE_TOO_COLD,
        LIMIT_ENTHALPY_SPAN,
        LIMIT_DETAIL,
        DECISION_STRONG,
        DECISION_CONSIDER,
        DECISION_NOT_RECOMMENDED,
        COP_HEADING,
        CHART_HEADING,
        CHART_GAP,
        CHART_OPERATING_POINT,
        CHART_NEAREST,
        AXIS_FLUE_OUTLET,
        AXIS_PRESSURE,
        AXIS_SOURCE_TEMP,
        BALANCE_HEADING,
        BALANCE_CONVERGED,
        BALANCE_REQUIRED_FLUE_OUT,
        BALANCE_ITERATIONS,
        BALANCE_TARGET_LOAD,
        BALANCE_SOURCE_TOTAL,
        BALANCE_SOURCE_INSUFFICIENT,
        BALANCE_MAX_ITERATIONS,
        PHYSICS_HEADING,
        PHYSICS_SAT_APPROX,
        PHYSICS_SAT_IF97,
        PHYSICS_H_APPROX,
        PHYSICS_H_IF97,
        PHYSICS_ERROR,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Zh,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("zh") {
            Language::Zh
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en/zh)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 > 해당 언어 내장 > 한국어 순이며, 모두 없으면 키를 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let built_in: Option<&'a str> = match self.lang {
            Language::En => en(key),
            Language::Zh => zh(key),
            Language::Ko => None,
        };
        built_in.or_else(|| ko(key)).unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("zh") => Some("zh".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    normalize_lang(&lang)
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale_string(&value))
}

/// TOML 기반 언어팩을 로드한다. 중첩 테이블은 점으로 이은 키가 된다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    let map = parse_toml_to_map(&content);
    if map.is_none() {
        tracing::warn!(dir, lang, "언어팩을 해석할 수 없어 내장 문자열을 사용합니다");
    }
    map
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        YES => "예",
        NO => "아니오",
        MANUAL_TAG => "(수동)",
        SIM_HEADING => "\n=== 시뮬레이션 결과 ===",
        SIM_TOPOLOGY => "구성:",
        SIM_COP => "COP:",
        SIM_LIFT => "리프트 [K]:",
        SIM_PRESSURE_RATIO => "압축비(추정):",
        SIM_RECOVERED => "열펌프 공급 열량 [kW]:",
        SIM_DRIVE => "구동 에너지 [kW]:",
        SIM_ANNUAL_SAVING => "연간 절감액:",
        SIM_PAYBACK => "회수기간 [년]:",
        SIM_COST_PER_HOUR => "도입 후 시간당 운전비:",
        SIM_BASELINE_COST => "기존 보일러 시간당 운전비:",
        SIM_CO2_REDUCTION => "CO2 감축률 [%]:",
        SIM_PER => "1차 에너지 효율(PER):",
        SIM_DECISION => "판단:",
        SIM_LIMIT_REASON => "제한 요인:",
        SIM_SINK_LIMITED => "부하 측 한계",
        SIM_SOURCE_LIMITED => "배연 열원 한계",
        SIM_STEAM_TONS => "증기톤 [t/h] 전체/열펌프/보일러:",
        SIM_COUPLING => "결합 효율 (도입 전 -> 후)",
        SIM_SITE_EFF => "현장 효율 [%]:",
        SIM_DISPATCH => "하이브리드 운전:",
        SIM_HP_FIRST => "열펌프 우선",
        SIM_BOILER_FIRST => "보일러 우선",
        SIM_REQUEST => "선정 요약",
        SIM_SOURCE_POTENTIAL => "배연 회수 잠재량",
        SIM_SENSIBLE => "현열 [kW]:",
        SIM_LATENT => "잠열 [kW]:",
        SIM_DEW_POINT => "이슬점 [°C]:",
        SIM_CONDENSATE => "응축수 [kg/h]:",
        SIM_FLUE_FLOW => "배가스량 [m³/h]:",
        LIMIT_HEADING => "\n!! 물리 한계로 계산을 중단했습니다",
        LIMIT_FALLBACK_COP => "폴백 COP:",
        LIMIT_EVAP_TOO_COLD => "증발 온도가 너무 낮습니다",
        LIMIT_COND_TOO_HOT => "응축 온도가 너무 높습니다",
        LIMIT_LIFT_TOO_SMALL => "온도차가 너무 작습니다",
        LIMIT_FLUE_TOO_COLD => "배연 온도가 너무 낮아 회수 가치가 없습니다",
        LIMIT_ENTHALPY_SPAN => "입출구 엔탈피 차가 너무 작습니다",
        DECISION_STRONG => "적극 추천",
        DECISION_CONSIDER => "검토 권장",
        DECISION_NOT_RECOMMENDED => "비추천",
        COP_HEADING => "\n=== COP 계산 ===",
        CHART_HEADING => "\n=== COP 곡선 ===",
        CHART_GAP => "(계산 불가)",
        CHART_OPERATING_POINT => "운전점:",
        CHART_NEAREST => "가까운 표본:",
        AXIS_FLUE_OUTLET => "목표 배연 출구 [°C]",
        AXIS_PRESSURE => "포화 압력 [MPa]",
        AXIS_SOURCE_TEMP => "열원 온도 [°C]",
        BALANCE_HEADING => "\n=== 역열수지 계산 ===",
        BALANCE_CONVERGED => "수렴",
        BALANCE_REQUIRED_FLUE_OUT => "필요 배연 출구 [°C]:",
        BALANCE_ITERATIONS => "반복 횟수:",
        BALANCE_TARGET_LOAD => "목표 부하 [kW]:",
        BALANCE_SOURCE_TOTAL => "배연 열량 [kW]:",
        BALANCE_SOURCE_INSUFFICIENT => "수렴 실패: 배연 열원이 부족합니다",
        BALANCE_MAX_ITERATIONS => "수렴 실패: 최대 반복 횟수 도달",
        PHYSICS_HEADING => "\n=== 근사식 vs IF97 ===",
        PHYSICS_SAT_APPROX => "포화 온도(근사) [°C]:",
        PHYSICS_SAT_IF97 => "포화 온도(IF97) [°C]:",
        PHYSICS_H_APPROX => "엔탈피(근사) [kJ/kg]:",
        PHYSICS_H_IF97 => "엔탈피(IF97) [kJ/kg]:",
        PHYSICS_ERROR => "오차 (K / %):",
        LIMIT_DETAIL => "입력 {value} / 한계 {bound}",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        YES => "yes",
        NO => "no",
        MANUAL_TAG => "(manual)",
        SIM_HEADING => "\n=== Simulation result ===",
        SIM_TOPOLOGY => "Topology:",
        SIM_COP => "COP:",
        SIM_LIFT => "Lift [K]:",
        SIM_PRESSURE_RATIO => "Pressure ratio (est.):",
        SIM_RECOVERED => "Heat delivered [kW]:",
        SIM_DRIVE => "Drive energy [kW]:",
        SIM_ANNUAL_SAVING => "Annual saving:",
        SIM_PAYBACK => "Payback [years]:",
        SIM_COST_PER_HOUR => "Hourly cost after retrofit:",
        SIM_BASELINE_COST => "Boiler-only hourly cost:",
        SIM_CO2_REDUCTION => "CO2 reduction [%]:",
        SIM_PER => "Primary energy ratio:",
        SIM_DECISION => "Decision:",
        SIM_LIMIT_REASON => "Limited by:",
        SIM_SINK_LIMITED => "sink",
        SIM_SOURCE_LIMITED => "flue-gas source",
        SIM_STEAM_TONS => "Steam t/h total/heat pump/boiler:",
        SIM_COUPLING => "Coupling efficiency (before -> after)",
        SIM_SITE_EFF => "Site efficiency [%]:",
        SIM_DISPATCH => "Hybrid dispatch:",
        SIM_HP_FIRST => "heat pump first",
        SIM_BOILER_FIRST => "boiler first",
        SIM_REQUEST => "Selection summary",
        SIM_SOURCE_POTENTIAL => "Flue-gas recovery potential",
        SIM_SENSIBLE => "Sensible [kW]:",
        SIM_LATENT => "Latent [kW]:",
        SIM_DEW_POINT => "Dew point [°C]:",
        SIM_CONDENSATE => "Condensate [kg/h]:",
        SIM_FLUE_FLOW => "Flue-gas flow [m³/h]:",
        LIMIT_HEADING => "\n!! Calculation stopped at a physical limit",
        LIMIT_FALLBACK_COP => "Fallback COP:",
        LIMIT_EVAP_TOO_COLD => "Evaporation temperature too low",
        LIMIT_COND_TOO_HOT => "Condensation temperature too high",
        LIMIT_LIFT_TOO_SMALL => "Temperature lift too small",
        LIMIT_FLUE_TOO_COLD => "Flue-gas temperature too low to be worth recovering",
        LIMIT_ENTHALPY_SPAN => "Inlet/outlet enthalpy difference too small",
        DECISION_STRONG => "strongly recommended",
        DECISION_CONSIDER => "worth considering",
        DECISION_NOT_RECOMMENDED => "not recommended",
        COP_HEADING => "\n=== COP ===",
        CHART_HEADING => "\n=== COP curve ===",
        CHART_GAP => "(invalid)",
        CHART_OPERATING_POINT => "Operating point:",
        CHART_NEAREST => "Nearest sample:",
        AXIS_FLUE_OUTLET => "Target flue outlet [°C]",
        AXIS_PRESSURE => "Saturation pressure [MPa]",
        AXIS_SOURCE_TEMP => "Source temperature [°C]",
        BALANCE_HEADING => "\n=== Reverse heat balance ===",
        BALANCE_CONVERGED => "converged",
        BALANCE_REQUIRED_FLUE_OUT => "Required flue outlet [°C]:",
        BALANCE_ITERATIONS => "Iterations:",
        BALANCE_TARGET_LOAD => "Target load [kW]:",
        BALANCE_SOURCE_TOTAL => "Flue-gas heat [kW]:",
        BALANCE_SOURCE_INSUFFICIENT => "Not converged: flue-gas source insufficient",
        BALANCE_MAX_ITERATIONS => "Not converged: iteration limit reached",
        PHYSICS_HEADING => "\n=== Approximation vs IF97 ===",
        PHYSICS_SAT_APPROX => "Saturation temperature (approx.) [°C]:",
        PHYSICS_SAT_IF97 => "Saturation temperature (IF97) [°C]:",
        PHYSICS_H_APPROX => "Enthalpy (approx.) [kJ/kg]:",
        PHYSICS_H_IF97 => "Enthalpy (IF97) [kJ/kg]:",
        PHYSICS_ERROR => "Deviation (K / %):",
        LIMIT_DETAIL => "value {value} / limit {bound}",
        _ => return None,
    })
}

fn zh(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "错误",
        YES => "是",
        NO => "否",
        MANUAL_TAG => "(手动)",
        SIM_HEADING => "\n=== 模拟结果 ===",
        SIM_TOPOLOGY => "方案:",
        SIM_COP => "COP:",
        SIM_LIFT => "温升 [K]:",
        SIM_PRESSURE_RATIO => "压缩比(估算):",
        SIM_RECOVERED => "热泵供热量 [kW]:",
        SIM_DRIVE => "驱动能耗 [kW]:",
        SIM_ANNUAL_SAVING => "年节省:",
        SIM_PAYBACK => "回收期 [年]:",
        SIM_COST_PER_HOUR => "改造后每小时费用:",
        SIM_BASELINE_COST => "原锅炉每小时费用:",
        SIM_CO2_REDUCTION => "CO2 减排率 [%]:",
        SIM_PER => "一次能源利用率:",
        SIM_DECISION => "结论:",
        SIM_LIMIT_REASON => "受限于:",
        SIM_SINK_LIMITED => "热汇",
        SIM_SOURCE_LIMITED => "烟气热源",
        SIM_STEAM_TONS => "蒸汽吨 [t/h] 总计/热泵/锅炉:",
        SIM_COUPLING => "耦合效率 (改造前 -> 后)",
        SIM_SITE_EFF => "现场效率 [%]:",
        SIM_DISPATCH => "混合运行:",
        SIM_HP_FIRST => "热泵优先",
        SIM_BOILER_FIRST => "锅炉优先",
        SIM_REQUEST => "选型摘要",
        SIM_SOURCE_POTENTIAL => "烟气余热潜力",
        SIM_SENSIBLE => "显热 [kW]:",
        SIM_LATENT => "潜热 [kW]:",
        SIM_DEW_POINT => "露点 [°C]:",
        SIM_CONDENSATE => "冷凝水 [kg/h]:",
        SIM_FLUE_FLOW => "烟气量 [m³/h]:",
        LIMIT_HEADING => "\n!! 超出物理限制，计算中止",
        LIMIT_FALLBACK_COP => "回退 COP:",
        LIMIT_EVAP_TOO_COLD => "蒸发温度过低",
        LIMIT_COND_TOO_HOT => "冷凝温度过高",
        LIMIT_LIFT_TOO_SMALL => "温差过小",
        LIMIT_FLUE_TOO_COLD => "排烟温度过低，无回收价值",
        LIMIT_ENTHALPY_SPAN => "进出口焓差过小",
        DECISION_STRONG => "强烈推荐",
        DECISION_CONSIDER => "建议考虑",
        DECISION_NOT_RECOMMENDED => "不推荐",
        COP_HEADING => "\n=== COP 计算 ===",
        CHART_HEADING => "\n=== COP 曲线 ===",
        CHART_GAP => "(无法计算)",
        CHART_OPERATING_POINT => "运行点:",
        CHART_NEAREST => "最近样本:",
        AXIS_FLUE_OUTLET => "目标排烟出口 [°C]",
        AXIS_PRESSURE => "饱和压力 [MPa]",
        AXIS_SOURCE_TEMP => "热源温度 [°C]",
        BALANCE_HEADING => "\n=== 反向热平衡 ===",
        BALANCE_CONVERGED => "收敛",
        BALANCE_REQUIRED_FLUE_OUT => "所需排烟出口 [°C]:",
        BALANCE_ITERATIONS => "迭代次数:",
        BALANCE_TARGET_LOAD => "目标负荷 [kW]:",
        BALANCE_SOURCE_TOTAL => "烟气热量 [kW]:",
        BALANCE_SOURCE_INSUFFICIENT => "未收敛: 热源不足",
        BALANCE_MAX_ITERATIONS => "未收敛: 达到最大迭代次数",
        PHYSICS_HEADING => "\n=== 近似式 vs IF97 ===",
        PHYSICS_SAT_APPROX => "饱和温度(近似) [°C]:",
        PHYSICS_SAT_IF97 => "饱和温度(IF97) [°C]:",
        PHYSICS_H_APPROX => "焓(近似) [kJ/kg]:",
        PHYSICS_H_IF97 => "焓(IF97) [kJ/kg]:",
        PHYSICS_ERROR => "偏差 (K / %):",
        LIMIT_DETAIL => "实际值 {value} / 限值 {bound}",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_overrides_then_built_in_then_key() {
        let zh = Translator::new("zh-CN");
        assert_eq!(zh.t(keys::LIMIT_FLUE_TOO_COLD), "排烟温度过低，无回收价值");
        assert_eq!(zh.t("no.such.key"), "no.such.key");

        let mut partial = HashMap::new();
        partial.insert(keys::SIM_COP.to_string(), "效率系数:".to_string());
        let packed = Translator {
            lang: Language::Zh,
            overrides: Some(partial),
        };
        assert_eq!(packed.t(keys::SIM_COP), "效率系数:");
        assert_eq!(packed.t(keys::PHYSICS_HEADING), "\n=== 近似式 vs IF97 ===");
    }

    #[test]
    fn built_in_tables_cover_every_key() {
        for key in keys::ALL {
            assert!(ko(key).is_some(), "ko missing {key}");
            assert!(en(key).is_some(), "en missing {key}");
            assert!(zh(key).is_some(), "zh missing {key}");
        }
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[limit]\nflue_too_cold = \"too cold\"\n").unwrap();
        assert_eq!(map.get("limit.flue_too_cold").map(String::as_str), Some("too cold"));
    }

    #[test]
    fn language_codes_normalise() {
        assert_eq!(resolve_language("en-GB", None), "en");
        assert_eq!(resolve_language("auto", Some("zh")), "zh");
    }
}
