//! 保険フォーム（契約者情報と補償条件）

use leptos::prelude::*;
use vinscout_common::insurance::{
    CoverageToggle, FixedParticipation, MandatoryLimit, ParticipationMode, PercentageParticipation,
};
use vinscout_common::{AppState, CoverageTerms, Language, VehicleId, WindowsCoverage};

/// 編集対象の補償条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageTarget {
    /// フリート全体
    Global,
    /// 車両ごとの個別条件
    Vehicle(VehicleId),
}

impl CoverageTarget {
    fn read(self, state: &AppState) -> Option<CoverageTerms> {
        match self {
            CoverageTarget::Global => Some(state.form().coverage.clone()),
            CoverageTarget::Vehicle(id) => state
                .vehicle_store()
                .get(id)
                .and_then(|v| v.individual_insurance.clone()),
        }
    }
}

fn apply(state: RwSignal<AppState>, target: CoverageTarget, edit: impl FnOnce(&mut CoverageTerms)) {
    state.update(|s| match target {
        CoverageTarget::Global => s.update_form(|f| edit(&mut f.coverage)),
        CoverageTarget::Vehicle(id) => {
            s.update_vehicle_insurance(id, edit);
        }
    });
}

fn windows_label(lang: Language, tier: WindowsCoverage) -> String {
    match tier {
        WindowsCoverage::Limit(n) => format!("{} 000 {}", n, currency(lang)),
        WindowsCoverage::NoLimit => lang.t("noLimit").to_string(),
        WindowsCoverage::Disabled => "-".to_string(),
    }
}

fn fixed_label(lang: Language, option: FixedParticipation) -> String {
    match option {
        FixedParticipation::Amount(n) => format!("{} {}", n, currency(lang)),
        FixedParticipation::Max => lang.t("max").to_string(),
    }
}

fn percentage_label(lang: Language, option: PercentageParticipation) -> String {
    match option {
        PercentageParticipation::Min => lang.t("min").to_string(),
        other => other.to_string(),
    }
}

fn currency(lang: Language) -> &'static str {
    match lang {
        Language::Cs => "Kč",
        Language::En => "CZK",
    }
}

#[component]
pub fn InsuranceForm(state: RwSignal<AppState>, lang: RwSignal<Language>) -> impl IntoView {
    let form = Memo::new(move |_| state.with(|s| s.form().clone()));

    view! {
        <section class="card insurance-form">
            <h2>{move || lang.get().t("insuranceDetails")}</h2>

            <h3>{move || lang.get().t("clientInformation")}</h3>
            <div class="settings-grid">
                <div class="form-group">
                    <label for="policyholder-ico">{move || lang.get().t("policyholderIco")}</label>
                    <input
                        type="text"
                        id="policyholder-ico"
                        placeholder=move || lang.get().t("enterPolicyholderIco")
                        prop:value=move || form.get().policyholder_ico
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.update_form(|f| f.policyholder_ico = value));
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="email">{move || lang.get().t("email")}</label>
                    <input
                        type="email"
                        id="email"
                        placeholder=move || lang.get().t("enterEmail")
                        prop:value=move || form.get().email
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.update_form(|f| f.email = value));
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="phone">{move || lang.get().t("phone")}</label>
                    <input
                        type="tel"
                        id="phone"
                        placeholder=move || lang.get().t("enterPhone")
                        prop:value=move || form.get().phone
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.update_form(|f| f.phone = value));
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="start">{move || lang.get().t("startOfInsurance")}</label>
                    <input
                        type="date"
                        id="start"
                        prop:value=move || {
                            form.get().start_of_insurance.map(|d| d.to_string()).unwrap_or_default()
                        }
                        on:change=move |ev| {
                            // 空欄または不正な日付は未設定として扱う
                            let date = event_target_value(&ev).parse().ok();
                            state.update(|s| s.update_form(|f| f.start_of_insurance = date));
                        }
                    />
                </div>
            </div>

            <CoverageEditor state=state lang=lang target=CoverageTarget::Global />
        </section>
    }
}

/// 補償のオン/オフと免責の編集
#[component]
pub fn CoverageEditor(state: RwSignal<AppState>, lang: RwSignal<Language>, target: CoverageTarget) -> impl IntoView {
    let terms = Memo::new(move |_| state.with(|s| target.read(s)).unwrap_or_default());
    let sections = move || terms.get().participation_sections();

    let toggles = CoverageToggle::ALL
        .into_iter()
        .map(|toggle| {
            view! {
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || toggle.get(&terms.get())
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            apply(state, target, |t| toggle.set(t, on));
                        }
                    />
                    {move || lang.get().t(toggle.key())}
                </label>
            }
        })
        .collect_view();

    view! {
        <div class="coverage-editor">
            <h3>{move || lang.get().t("insuranceCoverage")}</h3>
            <div class="coverage-grid">{toggles}</div>

            <Show when=move || terms.get().any_coverage_active()>
                <h3>{move || lang.get().t("participation")}</h3>

                <Show when=move || sections().mandatory_limit>
                    <div class="form-group">
                        <label>{move || lang.get().t("mandatoryInsuranceLimit")}</label>
                        <select on:change=move |ev| {
                            if let Ok(limit) = event_target_value(&ev).parse::<MandatoryLimit>() {
                                apply(state, target, |t| t.mandatory_insurance_limit = limit);
                            }
                        }>
                            {MandatoryLimit::ALL
                                .into_iter()
                                .map(|limit| {
                                    view! {
                                        <option
                                            value=limit.as_str()
                                            selected=move || terms.get().mandatory_insurance_limit == limit
                                        >
                                            {move || lang.get().t(&format!("limit{}", limit.as_str())).to_string()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </Show>

                <Show when=move || sections().accident_deductible>
                    <div class="form-group">
                        <label>{move || lang.get().t("accidentInsuranceParticipation")}</label>
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || terms.get().use_fixed_amount
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    apply(state, target, |t| {
                                        t.use_fixed_amount = on;
                                        if on {
                                            t.participation = ParticipationMode::Fixed;
                                        }
                                    });
                                }
                            />
                            {move || lang.get().t("fixedAmount")}
                        </label>
                        <Show when=move || terms.get().use_fixed_amount>
                            <select on:change=move |ev| {
                                if let Ok(option) = event_target_value(&ev).parse::<FixedParticipation>() {
                                    apply(state, target, |t| t.accident_insurance_fixed = option);
                                }
                            }>
                                {FixedParticipation::OPTIONS
                                    .into_iter()
                                    .map(|option| {
                                        view! {
                                            <option
                                                value=option.to_string()
                                                selected=move || terms.get().accident_insurance_fixed == option
                                            >
                                                {move || fixed_label(lang.get(), option)}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </Show>

                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || terms.get().use_percentage_amount
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    apply(state, target, |t| {
                                        t.use_percentage_amount = on;
                                        if on {
                                            t.participation = ParticipationMode::Percentage;
                                        }
                                    });
                                }
                            />
                            {move || lang.get().t("percentageAmount")}
                        </label>
                        <Show when=move || terms.get().use_percentage_amount>
                            <select on:change=move |ev| {
                                if let Ok(option) = event_target_value(&ev).parse::<PercentageParticipation>() {
                                    apply(state, target, |t| t.percentage_participation = option);
                                }
                            }>
                                {PercentageParticipation::OPTIONS
                                    .into_iter()
                                    .map(|option| {
                                        view! {
                                            <option
                                                value=option.to_string()
                                                selected=move || terms.get().percentage_participation == option
                                            >
                                                {move || percentage_label(lang.get(), option)}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </Show>
                    </div>
                </Show>

                <Show when=move || sections().windows_limit>
                    <div class="form-group">
                        <label>{move || lang.get().t("windowsInsuranceLimit")}</label>
                        <select on:change=move |ev| {
                            if let Ok(tier) = event_target_value(&ev).parse::<WindowsCoverage>() {
                                apply(state, target, |t| t.windows_insurance = tier);
                            }
                        }>
                            {WindowsCoverage::TIERS
                                .into_iter()
                                .map(|tier| {
                                    view! {
                                        <option
                                            value=tier.to_string()
                                            selected=move || terms.get().windows_insurance == tier
                                        >
                                            {move || windows_label(lang.get(), tier)}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
