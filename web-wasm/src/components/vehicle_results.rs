//! デコード結果（車両一覧）

use crate::components::insurance_form::{CoverageEditor, CoverageTarget};
use leptos::prelude::*;
use vinscout_common::{AppState, Language, VehicleId, VehicleRecord};

#[component]
pub fn VehicleResults(state: RwSignal<AppState>, lang: RwSignal<Language>) -> impl IntoView {
    let ids = move || state.with(|s| s.vehicles().iter().map(|v| v.id).collect::<Vec<_>>());

    view! {
        <section class="card vehicle-results">
            <h2>{move || lang.get().t("vehicleResults")}</h2>
            <Show
                when=move || state.with(|s| !s.vehicles().is_empty())
                fallback=move || view! { <p class="text-muted">{move || lang.get().t("noVehicles")}</p> }
            >
                <For
                    each=ids
                    key=|id| *id
                    children=move |id| view! { <VehicleCard state=state lang=lang id=id /> }
                />
            </Show>
        </section>
    }
}

/// 文字列フィールドの入力欄
fn text_field(
    state: RwSignal<AppState>,
    id: VehicleId,
    value: impl Fn() -> String + Send + Sync + 'static,
    write: fn(&mut VehicleRecord, String),
) -> impl IntoView {
    view! {
        <input
            type="text"
            prop:value=value
            on:input=move |ev| {
                let value = event_target_value(&ev);
                state.update(|s| {
                    s.update_vehicle(id, |v| write(v, value));
                });
            }
        />
    }
}

#[component]
fn VehicleCard(state: RwSignal<AppState>, lang: RwSignal<Language>, id: VehicleId) -> impl IntoView {
    let vehicle = Memo::new(move |_| {
        state.with(|s| s.vehicle_store().get(id).cloned())
    });
    let field = move |read: fn(&VehicleRecord) -> String| {
        move || vehicle.get().map(|v| read(&v)).unwrap_or_default()
    };

    let spec_rows = [
        ("type", field(|v| v.cebia.vehicle_type.clone())),
        ("manufacturer", field(|v| v.cebia.manufacturer.clone())),
        ("model", field(|v| v.cebia.model.clone())),
        ("year", field(|v| v.cebia.year.clone())),
        ("engine", field(|v| v.cebia.engine_displacement.clone())),
        ("power", field(|v| v.cebia.engine_power.clone())),
        ("maxWeight", field(|v| v.cebia.max_weight.clone())),
        ("seats", field(|v| v.cebia.seats.clone())),
        ("fuelType", field(|v| v.cebia.fuel_type.clone())),
    ]
    .into_iter()
    .map(|(key, value)| {
        view! {
            <div class="spec-row">
                <span class="text-muted">{move || lang.get().t(key)}</span>
                <span>{value}</span>
            </div>
        }
    })
    .collect_view();

    let individual = move || vehicle.get().is_some_and(|v| v.has_individual_coverage);
    let owner_same = move || vehicle.get().is_some_and(|v| v.owner_same_as_insurer);
    let operator_same = move || vehicle.get().is_some_and(|v| v.operator_same_as_insurer);

    view! {
        <div class="vehicle-card">
            <h3>{move || vehicle.get().map(|v| v.label().to_string()).unwrap_or_default()}</h3>

            <div class="settings-grid">
                <div class="form-group">
                    <label>{move || lang.get().t("vin")}</label>
                    {text_field(state, id, field(|v| v.vin.clone()), |v, value| v.vin = value)}
                </div>
                <div class="form-group">
                    <label>{move || lang.get().t("licensePlate")}</label>
                    {text_field(state, id, field(|v| v.license_plate.clone()), |v, value| v.license_plate = value)}
                </div>
                <div class="form-group">
                    <label>{move || lang.get().t("mileage")}</label>
                    {text_field(state, id, field(|v| v.mileage.clone()), |v, value| v.mileage = value)}
                </div>
                <div class="form-group">
                    <label>{move || lang.get().t("vehicleValue")}</label>
                    {text_field(state, id, field(|v| v.vehicle_value.clone()), |v, value| v.vehicle_value = value)}
                </div>
            </div>

            <h4>{move || lang.get().t("ownerOperatorInfo")}</h4>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=owner_same
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        state.update(|s| {
                            s.update_vehicle(id, |v| v.owner_same_as_insurer = on);
                        });
                    }
                />
                {move || lang.get().t("ownerSameAsPolicyholder")}
            </label>
            <Show when=move || !owner_same()>
                <div class="form-group">
                    <label>{move || lang.get().t("enterOwnerIco")}</label>
                    {text_field(state, id, field(|v| v.owner_tin.clone()), |v, value| v.owner_tin = value)}
                </div>
            </Show>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=operator_same
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        state.update(|s| {
                            s.update_vehicle(id, |v| v.operator_same_as_insurer = on);
                        });
                    }
                />
                {move || lang.get().t("operatorSameAsPolicyholder")}
            </label>
            <Show when=move || !operator_same()>
                <div class="form-group">
                    <label>{move || lang.get().t("enterOperatorIco")}</label>
                    {text_field(state, id, field(|v| v.operator_tin.clone()), |v, value| v.operator_tin = value)}
                </div>
            </Show>

            <h4>{move || lang.get().t("vehicleData")}</h4>
            <div class="spec-grid">{spec_rows}</div>

            <button
                class="btn btn-tertiary btn-small"
                on:click=move |_| {
                    state.update(|s| {
                        s.toggle_individual_coverage(id);
                    });
                }
            >
                {move || {
                    if individual() {
                        lang.get().t("keepSameCoverage")
                    } else {
                        lang.get().t("changeIndividualCoverage")
                    }
                }}
            </button>
            <Show when=individual>
                <CoverageEditor state=state lang=lang target=CoverageTarget::Vehicle(id) />
            </Show>
        </div>
    }
}
