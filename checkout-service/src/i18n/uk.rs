//! Ukrainian storefront strings.

pub(super) const ENTRIES: &[(&str, &str)] = &[
    ("nav.home", "Головна"),
    ("nav.contact", "Контакти"),
    ("nav.cart", "Кошик"),

    ("product.addToCart", "Додати в кошик"),
    ("product.buyNow", "Купити зараз"),
    ("product.price", "Ціна"),
    ("product.description", "Опис"),
    ("product.reviews", "Відгуки"),
    ("product.inStock", "В наявності"),
    ("product.outOfStock", "Немає в наявності"),

    ("cart.title", "Кошик покупок"),
    ("cart.empty", "Товарів в кошику не знайдено"),
    ("cart.continueShopping", "Продовжити покупки"),
    ("cart.product", "Товар"),
    ("cart.price", "Ціна"),
    ("cart.quantity", "Кількість"),
    ("cart.subtotal", "Проміжний підсумок"),
    ("cart.shipping", "Доставка"),
    ("cart.total", "Всього"),
    ("cart.clearCart", "Очистити кошик"),
    ("cart.proceedToCheckout", "Перейти до оформлення"),
    ("cart.flatRate", "Фіксована ставка"),
    ("cart.localPickup", "Самовивіз"),
    ("cart.freeShipping", "Безкоштовна доставка"),
    ("cart.remove", "Видалити"),
    ("cart.addMoreForFreeShipping", "Додайте ще ${{amount}} для безкоштовної доставки"),
    ("cart.eligibleForFreeShipping", "Ви маєте право на безкоштовну доставку"),

    ("contact.title", "Зв'яжіться з нами"),
    ("contact.sendMessage", "Надіслати повідомлення"),
    ("contact.yourName", "Ваше ім'я"),
    ("contact.yourEmail", "Ваш email"),
    ("contact.subject", "Тема"),
    ("contact.yourMessage", "Ваше повідомлення"),
    ("contact.sendMessageBtn", "Надіслати повідомлення"),
    ("contact.saveInfo", "Зберегти моє ім'я, email та веб-сайт у цьому браузері для наступного коментування."),
    ("contact.findOnSocial", "Знайти в соціальних мережах"),
    ("contact.writeSubject", "Напишіть вашу тему"),
    ("contact.writeMessage", "Напишіть ваше повідомлення тут..."),
    ("contact.messageSent", "Повідомлення успішно надіслано!"),

    ("checkout.title", "Оформлення замовлення"),
    ("checkout.shipping", "Інформація про доставку"),
    ("checkout.payment", "Спосіб оплати"),
    ("checkout.review", "Перегляд замовлення"),
    ("checkout.placeOrder", "Розмістити замовлення"),

    ("payment.creditCard", "Кредитна картка"),
    ("payment.paypal", "PayPal"),
    ("payment.applePay", "Apple Pay"),
    ("payment.googlePay", "Google Pay"),
    ("payment.cod", "Оплата при отриманні"),

    ("form.firstName", "Ім'я"),
    ("form.lastName", "Прізвище"),
    ("form.email", "Електронна пошта"),
    ("form.phone", "Телефон"),
    ("form.address", "Адреса"),
    ("form.city", "Місто"),
    ("form.zipCode", "Поштовий індекс"),
    ("form.country", "Країна"),

    ("message.success", "Успішно!"),
    ("message.error", "Сталася помилка"),
    ("message.loading", "Завантаження..."),
    ("message.orderPlaced", "Замовлення успішно оформлено"),
    ("message.paymentFailed", "Платіж не вдався"),

    ("common.save", "Зберегти"),
    ("common.cancel", "Скасувати"),
    ("common.delete", "Видалити"),
    ("common.edit", "Редагувати"),
    ("common.view", "Переглянути"),
    ("common.search", "Пошук"),
    ("common.filter", "Фільтр"),
    ("common.sort", "Сортувати"),
];
