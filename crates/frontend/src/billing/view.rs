use crate::billing::specifics::BillingSpecifics;
use crate::billing::view_model::BillingViewModel;
use crate::shared::components::SearchableSelectOrCreate;
use crate::shared::icons::icon;
use contracts::admin::SelectOption;
use leptos::prelude::*;

/// Billing flow controller: owns the shared billing state and composes the
/// injected specifics (doctor visit or pharmacy sale) around it.
#[component]
pub fn BillingPage<S: BillingSpecifics>(specifics: S) -> impl IntoView {
    let vm = BillingViewModel::new();
    let picked = RwSignal::new(Option::<SelectOption>::None);

    let title = specifics.title();
    let item_label = specifics.item_label();
    let endpoint = specifics.item_endpoint();
    let kind = specifics.item_kind();
    let specifics_panel = specifics.specifics_view(vm);
    let specifics = StoredValue::new(specifics);

    // Every pick becomes one line; the picker resets for the next item.
    Effect::new(move |_| {
        if let Some(option) = picked.get() {
            vm.add_item(kind, &option);
            picked.set(None);
        }
    });

    let base = move || specifics.with_value(|s| s.base_items());

    let on_save = move |_| {
        if let Err(message) = specifics.with_value(|s| s.validate()) {
            vm.error.set(Some(message));
            return;
        }
        let (base_items, booking, event) = specifics.with_value(|s| {
            (s.base_items(), s.booking_id(), s.notify_event())
        });
        vm.save(base_items, booking, event);
    };

    view! {
        <div class="billing-page" style="max-width: 760px;">
            <h2 style="margin: 0 0 12px 0; font-size: 18px;">{title}</h2>

            {move || vm.last_saved.get().map(|bill| view! {
                <div style="background: #e2f4e5; color: #1e7a2e; padding: 8px 10px; border-radius: 4px; margin-bottom: 10px; font-size: 14px;">
                    {format!("Bill #{} saved, total {:.2}", bill.id, bill.total)}
                </div>
            })}

            {move || vm.error.get().map(|e| view! {
                <div class="error" style="background: #fee; color: #c33; padding: 8px 10px; border-radius: 4px; margin-bottom: 10px; font-size: 14px;">
                    {e}
                </div>
            })}

            <div class="form-group" style="margin-bottom: 10px; max-width: 420px;">
                <label style="display: block; font-size: 13px; color: #555; margin-bottom: 3px;">
                    {"Patient"}
                </label>
                <SearchableSelectOrCreate endpoint="patients" value=vm.patient placeholder="Search patients..." />
            </div>

            {specifics_panel}

            <div class="form-group" style="margin-bottom: 10px; max-width: 420px;">
                <label style="display: block; font-size: 13px; color: #555; margin-bottom: 3px;">
                    {item_label}
                </label>
                <SearchableSelectOrCreate endpoint=endpoint value=picked placeholder="Add an item..." />
            </div>

            <table style="width: 100%; border-collapse: collapse; background: white; font-size: 14px; margin-bottom: 10px;">
                <thead style="background: #f7f8fa; border-bottom: 2px solid #e5e7eb;">
                    <tr>
                        <th style="padding: 8px 10px; text-align: left;">{"Item"}</th>
                        <th style="padding: 8px 10px; text-align: right; width: 80px;">{"Qty"}</th>
                        <th style="padding: 8px 10px; text-align: right; width: 110px;">{"Unit price"}</th>
                        <th style="padding: 8px 10px; text-align: right; width: 110px;">{"Total"}</th>
                        <th style="width: 40px;">{""}</th>
                    </tr>
                </thead>
                <tbody>
                    {move || base()
                        .into_iter()
                        .map(|item| view! {
                            <tr style="border-bottom: 1px solid #f0f0f0; color: #555;">
                                <td style="padding: 7px 10px;">{item.name.clone()}</td>
                                <td style="padding: 7px 10px; text-align: right;">{item.quantity}</td>
                                <td style="padding: 7px 10px; text-align: right;">{format!("{:.2}", item.unit_price)}</td>
                                <td style="padding: 7px 10px; text-align: right;">{format!("{:.2}", item.line_total())}</td>
                                <td></td>
                            </tr>
                        })
                        .collect_view()}
                    {move || vm.items.get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, item)| view! {
                            <tr style="border-bottom: 1px solid #f0f0f0;">
                                <td style="padding: 7px 10px;">{item.name.clone()}</td>
                                <td style="padding: 7px 10px; text-align: right;">
                                    <input
                                        type="number"
                                        min="1"
                                        style="width: 56px; padding: 3px 6px; border: 1px solid #ddd; border-radius: 4px; text-align: right;"
                                        prop:value=item.quantity.to_string()
                                        on:input=move |ev| {
                                            let quantity = event_target_value(&ev).parse().unwrap_or(1);
                                            vm.set_quantity(index, quantity);
                                        }
                                    />
                                </td>
                                <td style="padding: 7px 10px; text-align: right;">{format!("{:.2}", item.unit_price)}</td>
                                <td style="padding: 7px 10px; text-align: right;">{format!("{:.2}", item.line_total())}</td>
                                <td style="text-align: center;">
                                    <button
                                        class="button button--small"
                                        title="Remove"
                                        on:click=move |_| vm.remove_item(index)
                                    >
                                        {icon("x")}
                                    </button>
                                </td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
                <tfoot>
                    <tr style="border-top: 2px solid #e5e7eb; font-weight: 600;">
                        <td style="padding: 8px 10px;" colspan="3">{"Total"}</td>
                        <td style="padding: 8px 10px; text-align: right;">
                            {move || format!("{:.2}", vm.total_with(&base()))}
                        </td>
                        <td></td>
                    </tr>
                </tfoot>
            </table>

            <div style="display: flex; justify-content: flex-end;">
                <button
                    class="button button--primary"
                    on:click=on_save
                    disabled=move || vm.saving.get()
                >
                    {icon("save")}
                    {move || if vm.saving.get() { " Saving..." } else { " Save bill" }}
                </button>
            </div>
        </div>
    }
}
