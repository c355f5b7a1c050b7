//! Vehicles Page

use chrono::Datelike;
use leptos::prelude::*;

use crate::api::{self, VehicleInput};
use crate::components::{
    field_error, DeleteConfirmButton, EmptyState, ErrorText, ExportButton, FormMode, Modal, PageHeader, QueryStatus,
    SearchInput, SelectField, TextField,
};
use crate::context::use_app_context;
use crate::export;
use crate::hooks::{run_mutation, submit_form, use_customers, use_vehicles, VEHICLE_CHANGES};
use crate::matching::matches_query;
use crate::models::Vehicle;
use crate::validation::{optional_non_negative, optional_text, require, year_in_range, FormErrors};

const FIRST_MODEL_YEAR: i32 = 1950;

#[component]
pub fn VehiclesPage() -> impl IntoView {
    let ctx = use_app_context();
    let vehicles = use_vehicles();
    let customers = use_customers();
    let search = RwSignal::new(String::new());
    let form = RwSignal::new(None::<FormMode<Vehicle>>);

    let owner_name = move |customer_id: Option<u32>| -> String {
        let Some(id) = customer_id else {
            return "-".to_string();
        };
        customers.data.with(|list| {
            list.as_ref()
                .and_then(|l| l.iter().find(|c| c.id == id))
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("#{}", id))
        })
    };

    let filtered = Memo::new(move |_| {
        let query = search.get();
        vehicles
            .get_or_default()
            .into_iter()
            .filter(|v| {
                matches_query(
                    &query,
                    &[v.make.as_str(), v.model.as_str(), v.registration_number.as_str(), v.vin.as_deref().unwrap_or("")],
                )
            })
            .collect::<Vec<_>>()
    });

    let export_csv = move |_: ()| {
        if let Err(e) = export::download_csv("vehicles", &filtered.get_untracked()) {
            ctx.notify_error(&e);
        }
    };

    view! {
        <section class="page">
            <PageHeader title="Vehicles">
                <SearchInput value=search placeholder="Search make, model, plate or VIN" />
                <ExportButton on_export=export_csv />
                <button class="btn btn-primary" on:click=move |_| form.set(Some(FormMode::Create))>
                    "+ New vehicle"
                </button>
            </PageHeader>

            <QueryStatus loading=vehicles.loading error=vehicles.error />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Registration"</th>
                        <th>"Vehicle"</th>
                        <th>"Year"</th>
                        <th>"Owner"</th>
                        <th>"VIN"</th>
                        <th class="num">"Mileage"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || filtered.get().into_iter().map(|vehicle| {
                        let id = vehicle.id;
                        let owner = vehicle.customer_id;
                        let for_edit = vehicle.clone();
                        let subject = format!("vehicle {}", vehicle.registration_number);
                        view! {
                            <tr>
                                <td class="mono">{vehicle.registration_number}</td>
                                <td>{format!("{} {}", vehicle.make, vehicle.model)}</td>
                                <td>{vehicle.year.map(|y| y.to_string()).unwrap_or_default()}</td>
                                <td>{move || owner_name(owner)}</td>
                                <td class="mono">{vehicle.vin.unwrap_or_default()}</td>
                                <td class="num">{vehicle.mileage.map(|m| format!("{:.0} km", m)).unwrap_or_default()}</td>
                                <td class="row-actions">
                                    <button class="btn btn-ghost" on:click=move |_| form.set(Some(FormMode::Edit(for_edit.clone())))>
                                        "Edit"
                                    </button>
                                    <DeleteConfirmButton subject=subject on_confirm=move |_: ()| {
                                        run_mutation(ctx, "Vehicle deleted", VEHICLE_CHANGES, api::delete_vehicle(id), |_| {});
                                    } />
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            <Show when=move || !vehicles.loading.get() && filtered.with(|f| f.is_empty())>
                <EmptyState message="No vehicles found" />
            </Show>

            <Modal
                open=Signal::derive(move || form.with(Option::is_some))
                title=Signal::derive(move || form.with(|m| m.as_ref().map(|m| m.title("vehicle")).unwrap_or_default()))
                on_close=move |_: ()| form.set(None)
            >
                <VehicleForm mode=form />
            </Modal>
        </section>
    }
}

#[component]
fn VehicleForm(mode: RwSignal<Option<FormMode<Vehicle>>>) -> impl IntoView {
    let ctx = use_app_context();
    let customers = use_customers();
    let initial = mode.get_untracked().and_then(|m| m.editing().cloned());
    let editing_id = initial.as_ref().map(|v| v.id);
    let seed = initial.as_ref().map(VehicleInput::from).unwrap_or_default();

    let owner = RwSignal::new(seed.customer_id.map(|id| id.to_string()).unwrap_or_default());
    let make = RwSignal::new(seed.make);
    let model = RwSignal::new(seed.model);
    let year = RwSignal::new(seed.year.map(|y| y.to_string()).unwrap_or_default());
    let registration = RwSignal::new(seed.registration_number);
    let vin = RwSignal::new(seed.vin.unwrap_or_default());
    let mileage = RwSignal::new(seed.mileage.map(|m| m.to_string()).unwrap_or_default());
    let color = RwSignal::new(seed.color.unwrap_or_default());
    let errors = RwSignal::new(FormErrors::new());
    let saving = RwSignal::new(false);

    let owner_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "No owner".to_string())];
        options.extend(
            customers
                .get_or_default()
                .into_iter()
                .map(|c| (c.id.to_string(), format!("{} ({})", c.name, c.phone))),
        );
        options
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let latest_year = chrono::Local::now().year() + 1;
        let mut found = FormErrors::new();
        let mileage_value = found.check(optional_non_negative("Mileage", &mileage.get_untracked()));
        let input = VehicleInput {
            customer_id: owner.get_untracked().parse().ok(),
            make: found.check(require("Make", &make.get_untracked())),
            model: found.check(require("Model", &model.get_untracked())),
            year: found.check(year_in_range("Year", &year.get_untracked(), FIRST_MODEL_YEAR, latest_year)),
            registration_number: found.check(require("Registration", &registration.get_untracked())).to_uppercase(),
            vin: optional_text(&vin.get_untracked()).map(|v| v.to_uppercase()),
            mileage: (!mileage.get_untracked().trim().is_empty()).then_some(mileage_value),
            color: optional_text(&color.get_untracked()),
        };
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        let action = async move {
            match editing_id {
                Some(id) => api::update_vehicle(id, &input).await,
                None => api::create_vehicle(&input).await,
            }
        };
        submit_form(ctx, saving, "Vehicle saved", VEHICLE_CHANGES, action, move |_| mode.set(None));
    };

    view! {
        <form class="form form-grid" on:submit=submit>
            <SelectField label="Owner" value=owner options=owner_options />
            <TextField label="Registration" value=registration error=field_error(errors, "Registration") />
            <TextField label="Make" value=make error=field_error(errors, "Make") />
            <TextField label="Model" value=model error=field_error(errors, "Model") />
            <TextField label="Year" value=year input_type="number" error=field_error(errors, "Year") />
            <TextField label="VIN" value=vin />
            <TextField label="Mileage (km)" value=mileage input_type="number" error=field_error(errors, "Mileage") />
            <TextField label="Color" value=color />
            <ErrorText errors=errors />
            <div class="form-actions">
                <button type="button" class="btn btn-ghost" on:click=move |_| mode.set(None)>"Cancel"</button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>"Save"</button>
            </div>
        </form>
    }
}
